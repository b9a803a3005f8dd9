//! `tc-robot` — the composition root and a simulated host for a robot built
//! on the `tickcmd` scheduler.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`config`]     | `RobotConfig` and its tuning sections (JSON)               |
//! | [`subsystem`]  | `Drive`, `Lights`, `Intake`, `Shooter`, `Subsystems`       |
//! | [`operator`]   | `GamepadState`, `OperatorInput` — trigger condition source |
//! | [`modes`]      | `DriveMode`, `AutoPattern`, drive math                     |
//! | [`behaviors`]  | `DefaultDrive`, `ShootNote`, autonomous routines           |
//! | [`container`]  | `RobotContainer` — one-time assembly                       |
//! | [`script`]     | `InputScript` — replayed operator input and selections     |
//! | [`host`]       | `Host`, `Phase`, `RunStats` — the fixed-period loop        |
//! | [`error`]      | `RobotError`, `RobotResult<T>`                             |
//!
//! # Example
//!
//! ```rust,ignore
//! let config = RobotConfig::default();
//! let container = RobotContainer::new(&config)?;
//! container.auto_pattern().select("Drive Forward")?;
//! let plan = PhasePlan::from_config(&config);
//! let mut host = Host::new(container, &config, InputScript::demo(plan.teleop_start()));
//! let stats = host.run(plan.teleop_start() + 500);
//! ```

pub mod behaviors;
pub mod config;
pub mod container;
pub mod error;
pub mod host;
pub mod modes;
pub mod operator;
pub mod script;
pub mod subsystem;


pub use config::{AutoTuning, DriveTuning, MechanismTuning, RobotConfig};
pub use container::{AUTO_PATTERN_SELECTOR, DRIVE_MODE_SELECTOR, OperatorBindings, RobotContainer};
pub use error::{RobotError, RobotResult};
pub use host::{Host, Phase, PhasePlan, RunStats};
pub use modes::{AutoPattern, DriveMode};
pub use operator::{GamepadState, OperatorInput};
pub use script::{InputScript, Selection};
pub use subsystem::{LightPattern, Subsystems};
