//! The robot's behaviors.
//!
//! | Behavior         | Requires          | Finishes                          |
//! |------------------|-------------------|-----------------------------------|
//! | `DefaultDrive`   | drive             | never (default behavior)          |
//! | `ShootNote`      | shooter, intake   | after spin-up + feed              |
//! | `intake_note`    | intake            | never (cancelled on release)      |
//! | `drive_for`      | drive             | after a fixed number of ticks     |
//! | `autonomous`     | per pattern       | per pattern                       |

use std::rc::Rc;

use tc_behavior::{
    Behavior, BehaviorContext, BehaviorExt, BehaviorResult, NoopBehavior, Requirements, RunBehavior,
    Timeout,
};

use crate::config::{AutoTuning, DriveTuning, MechanismTuning};
use crate::modes::{AutoPattern, DriveMode, apply_deadband, arcade, tank};
use crate::operator::OperatorInput;
use crate::subsystem::Subsystems;

// ── DefaultDrive ──────────────────────────────────────────────────────────────

/// Teleoperated driving in the mode that was selected when it was built.
pub struct DefaultDrive {
    mode:      DriveMode,
    input:     OperatorInput,
    subsystem: Subsystems,
    tuning:    DriveTuning,
}

impl DefaultDrive {
    pub fn new(mode: DriveMode, input: OperatorInput, subsystem: Subsystems, tuning: DriveTuning) -> Self {
        Self { mode, input, subsystem, tuning }
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }
}

impl Behavior for DefaultDrive {
    fn name(&self) -> &str {
        "defaultDrive"
    }

    fn requirements(&self) -> Requirements {
        Requirements::from([self.subsystem.ids.drive])
    }

    fn initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        tracing::debug!(tick = %ctx.tick, mode = %self.mode, "default drive engaged");
    }

    fn execute(&mut self, _ctx: &mut BehaviorContext<'_>) {
        let pad = self.input.pad();
        let db = self.tuning.deadband;
        let (left, right) = match self.mode {
            DriveMode::Tank => tank(apply_deadband(pad.left_y, db), apply_deadband(pad.right_y, db)),
            DriveMode::DualStickArcade => arcade(apply_deadband(pad.left_y, db), apply_deadband(pad.right_x, db)),
            DriveMode::SingleStickArcade => arcade(apply_deadband(pad.left_y, db), apply_deadband(pad.left_x, db)),
        };
        let scale = if pad.slow {
            self.tuning.slow_scale
        } else if pad.boost {
            self.tuning.boost_scale
        } else {
            self.tuning.normal_scale
        };
        self.subsystem.drive.borrow_mut().set_motor_speeds(left * scale, right * scale);
    }

    fn end(&mut self, _interrupted: bool) {
        self.subsystem.drive.borrow_mut().stop();
    }
}

// ── ShootNote ─────────────────────────────────────────────────────────────────

/// Spin the shooter up, then feed the note with the intake.
pub struct ShootNote {
    subsystem: Subsystems,
    tuning:    MechanismTuning,
    elapsed:   u64,
}

impl ShootNote {
    pub fn new(subsystem: Subsystems, tuning: MechanismTuning) -> Self {
        Self { subsystem, tuning, elapsed: 0 }
    }
}

impl Behavior for ShootNote {
    fn name(&self) -> &str {
        "shootNote"
    }

    fn requirements(&self) -> Requirements {
        Requirements::from([self.subsystem.ids.shooter, self.subsystem.ids.intake])
    }

    fn initialize(&mut self, _ctx: &mut BehaviorContext<'_>) {
        self.elapsed = 0;
        self.subsystem.shooter.borrow_mut().set_speed(self.tuning.shooter_speed);
    }

    fn execute(&mut self, _ctx: &mut BehaviorContext<'_>) {
        self.elapsed += 1;
        if self.elapsed == self.tuning.spin_up_ticks {
            self.subsystem.intake.borrow_mut().set_speed(1.0);
        }
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.tuning.spin_up_ticks + self.tuning.feed_ticks
    }

    fn end(&mut self, interrupted: bool) {
        self.subsystem.intake.borrow_mut().stop();
        self.subsystem.shooter.borrow_mut().stop();
        if interrupted {
            tracing::debug!(elapsed = self.elapsed, "shot aborted");
        }
    }
}

// ── Simple building-block behaviors ───────────────────────────────────────────

/// Run the intake until interrupted.
pub fn intake_note(subsystem: &Subsystems, speed: f64) -> RunBehavior {
    let intake = Rc::clone(&subsystem.intake);
    let stop = Rc::clone(&subsystem.intake);
    RunBehavior::new("intakeNote", move || intake.borrow_mut().set_speed(speed))
        .requires(subsystem.ids.intake)
        .on_end(move |_| stop.borrow_mut().stop())
}

/// Drive straight at `speed` for `ticks` ticks, then stop.
pub fn drive_for(subsystem: &Subsystems, speed: f64, ticks: u64) -> Timeout<RunBehavior> {
    let drive = Rc::clone(&subsystem.drive);
    let stop = Rc::clone(&subsystem.drive);
    RunBehavior::new("driveFor", move || drive.borrow_mut().set_motor_speeds(speed, speed))
        .requires(subsystem.ids.drive)
        .on_end(move |_| stop.borrow_mut().stop())
        .with_timeout(ticks)
}

// ── Autonomous ────────────────────────────────────────────────────────────────

/// Resources any autonomous pattern may use.
pub fn autonomous_requirements(subsystem: &Subsystems) -> Requirements {
    Requirements::from([subsystem.ids.drive, subsystem.ids.intake, subsystem.ids.shooter])
}

/// Build the routine for `pattern`.
///
/// Every pattern stays within [`autonomous_requirements`].
pub fn autonomous(
    pattern: AutoPattern,
    subsystem: &Subsystems,
    auto: &AutoTuning,
    mechanisms: &MechanismTuning,
) -> Box<dyn Behavior> {
    match pattern {
        AutoPattern::DoNothing => NoopBehavior.boxed(),
        AutoPattern::DriveForward => drive_for(subsystem, auto.drive_speed, auto.leg_ticks).named("driveForward").boxed(),
        AutoPattern::ThreeNote => match three_note(subsystem, auto, mechanisms) {
            Ok(routine) => routine,
            Err(e) => {
                tracing::error!(error = %e, "three-note routine rejected; running nothing");
                NoopBehavior.boxed()
            }
        },
    }
}

/// Shoot the preloaded note, then twice: drive back collecting a note,
/// return, shoot.
fn three_note(subsystem: &Subsystems, auto: &AutoTuning, mechanisms: &MechanismTuning) -> BehaviorResult<Box<dyn Behavior>> {
    let shoot = || ShootNote::new(subsystem.clone(), mechanisms.clone());
    let collect = || {
        drive_for(subsystem, -auto.drive_speed, auto.leg_ticks)
            .deadline_for(intake_note(subsystem, mechanisms.intake_speed))
    };
    let routine = shoot()
        .and_then(collect()?)
        .and_then(drive_for(subsystem, auto.drive_speed, auto.leg_ticks))
        .and_then(shoot())
        .and_then(collect()?)
        .and_then(drive_for(subsystem, auto.drive_speed, auto.leg_ticks))
        .and_then(shoot())
        .named("threeNote");
    Ok(routine.boxed())
}
