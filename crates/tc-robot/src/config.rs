//! Robot configuration, loaded from JSON by the host binary.
//!
//! Every field has a default, so a partial file only overrides what it
//! names:
//!
//! ```json
//! {
//!   "loop":  { "period_ms": 20, "total_ticks": 1500, "autonomous_ticks": 250 },
//!   "drive": { "deadband": 0.08 },
//!   "presets": "presets.csv"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tc_core::LoopConfig;

use crate::{RobotError, RobotResult};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    #[serde(rename = "loop")]
    pub loop_config: LoopConfig,

    pub drive: DriveTuning,

    pub mechanisms: MechanismTuning,

    pub auto: AutoTuning,

    /// Ticks spent disabled before autonomous begins.
    pub disabled_ticks: u64,

    /// Selector presets applied after the container is built.
    pub presets: Option<PathBuf>,
}

/// Operator drive shaping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveTuning {
    /// Stick values with magnitude below this are treated as zero.
    pub deadband: f64,
    /// Output scale with no modifier button held.
    pub normal_scale: f64,
    /// Output scale while the boost button is held.
    pub boost_scale: f64,
    /// Output scale while the slow button is held (wins over boost).
    pub slow_scale: f64,
}

impl Default for DriveTuning {
    fn default() -> Self {
        Self { deadband: 0.1, normal_scale: 0.6, boost_scale: 1.0, slow_scale: 0.3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MechanismTuning {
    pub intake_speed:  f64,
    pub shooter_speed: f64,
    /// Ticks the shooter spins before the note is fed.
    pub spin_up_ticks: u64,
    /// Ticks the intake feeds the shooter.
    pub feed_ticks:    u64,
}

impl Default for MechanismTuning {
    fn default() -> Self {
        Self { intake_speed: 0.5, shooter_speed: 1.0, spin_up_ticks: 25, feed_ticks: 15 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoTuning {
    pub drive_speed: f64,
    /// Length of one autonomous drive leg.
    pub leg_ticks:   u64,
}

impl Default for AutoTuning {
    fn default() -> Self {
        Self { drive_speed: 0.4, leg_ticks: 75 }
    }
}

impl RobotConfig {
    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> RobotResult<Self> {
        let file = std::fs::File::open(path)?;
        let config: RobotConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    pub fn validate(&self) -> RobotResult<()> {
        self.loop_config
            .validate()
            .map_err(|e| RobotError::Config(e.to_string()))?;
        let d = &self.drive;
        if !(0.0..1.0).contains(&d.deadband) {
            return Err(RobotError::Config(format!("drive.deadband {} outside [0, 1)", d.deadband)));
        }
        for (name, scale) in [("normal", d.normal_scale), ("boost", d.boost_scale), ("slow", d.slow_scale)] {
            if !(0.0..=1.0).contains(&scale) {
                return Err(RobotError::Config(format!("drive.{name}_scale {scale} outside [0, 1]")));
            }
        }
        Ok(())
    }
}
