//! tc-robot — run the robot program against a scripted operator.
//!
//! Disabled, then autonomous, then a short teleop drill, all without
//! hardware.  Logs go through `tracing`; set `RUST_LOG=debug` to see every
//! behavior start/end and trigger fire.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use tc_robot::{Host, InputScript, PhasePlan, RobotConfig, RobotContainer};

/// Teleop ticks run when neither the config nor `--ticks` bounds the run.
const DEFAULT_TELEOP_TICKS: u64 = 500;

#[derive(Parser)]
#[command(name = "tc-robot", about = "Simulated host loop for the tickcmd robot program")]
struct Cli {
    /// JSON configuration file (every field optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV of `selector,option` rows applied after assembly
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Total ticks to run, overriding the configuration
    #[arg(long)]
    ticks: Option<u64>,

    /// Loop period in milliseconds, overriding the configuration
    #[arg(long)]
    period_ms: Option<u32>,

    /// Sleep out each period instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Drive mode label, e.g. "Dual Stick Arcade"
    #[arg(long)]
    drive_mode: Option<String>,

    /// Autonomous pattern label, e.g. "Three Note"
    #[arg(long)]
    auto: Option<String>,
}

fn main() -> Result<()> {
    // Respects RUST_LOG, defaults to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // 1. Configuration: file, then command-line overrides.
    let mut config = match &cli.config {
        Some(path) => RobotConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RobotConfig::default(),
    };
    if let Some(ticks) = cli.ticks {
        config.loop_config.total_ticks = Some(ticks);
    }
    if let Some(period_ms) = cli.period_ms {
        config.loop_config.period_ms = period_ms;
    }
    if cli.presets.is_some() {
        config.presets = cli.presets.clone();
    }

    // 2. Assemble.
    let container = RobotContainer::new(&config).context("assembling the robot")?;
    if let Some(label) = &cli.drive_mode {
        container.drive_mode().select(label).context("--drive-mode")?;
    }
    if let Some(label) = &cli.auto {
        container.auto_pattern().select(label).context("--auto")?;
    }
    for (selector, option) in container.selectors().snapshot() {
        tracing::info!(%selector, %option, "selection");
    }

    // 3. Run.
    let plan = PhasePlan::from_config(&config);
    let total = config
        .loop_config
        .end_tick()
        .map_or(plan.teleop_start() - 1 + DEFAULT_TELEOP_TICKS, |end| end.0);
    let mut host = Host::new(container, &config, InputScript::demo(plan.teleop_start()))
        .realtime(cli.realtime);

    let t0 = Instant::now();
    let stats = host.run(total);
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!("Ran {} ticks in {:.3} s (final phase: {})", stats.ticks, elapsed.as_secs_f64(), host.phase());
    println!("  triggers fired       : {}", stats.fired);
    println!("  behaviors started    : {}", stats.started);
    println!("  behaviors completed  : {}", stats.completed);
    println!("  behaviors interrupted: {}", stats.interrupted);
    println!();

    let scheduler = host.container().scheduler();
    println!("{:<10} {:<16}", "Resource", "Owner");
    println!("{}", "-".repeat(26));
    for (_, resource, owner) in scheduler.ownership() {
        let owner = owner.and_then(|id| scheduler.behavior_name(id)).unwrap_or("-");
        println!("{resource:<10} {owner:<16}");
    }

    Ok(())
}
