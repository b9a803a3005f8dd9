//! `RobotContainer` — one-time assembly of the scheduler, selectors and
//! operator bindings.
//!
//! | Binding           | Trigger                      | Action                              |
//! |-------------------|------------------------------|-------------------------------------|
//! | `intakeButton`    | A pressed                    | start a fresh `intakeNote`          |
//! | `intakeRelease`   | A released                   | cancel what `intakeButton` started  |
//! | `shootButton`     | B pressed                    | start a fresh `shootNote`           |
//! | `cancelShot`      | Back pressed                 | cancel what `shootButton` started   |
//! | `cancelIntake`    | Back pressed                 | cancel what `intakeButton` started  |
//! | `systemActive`    | robot enabled (rising edge)  | switch the lights to idle           |

use std::path::Path;
use std::rc::Rc;

use tc_behavior::{BehaviorFactory, Deferred, InstantBehavior};
use tc_core::{BehaviorId, TriggerId};
use tc_sched::{Binding, CancelTarget, Scheduler, SchedulerBuilder};
use tc_select::{Selector, SelectorRegistry};
use tc_trigger::Trigger;

use crate::behaviors::{DefaultDrive, ShootNote, autonomous, autonomous_requirements, intake_note};
use crate::config::RobotConfig;
use crate::modes::{AutoPattern, DriveMode};
use crate::operator::OperatorInput;
use crate::subsystem::{SubsystemIds, Subsystems};
use crate::RobotResult;

pub const DRIVE_MODE_SELECTOR: &str = "Drive Mode";
pub const AUTO_PATTERN_SELECTOR: &str = "Auto Pattern";

/// Trigger ids of the operator bindings, for inspection.
#[derive(Copy, Clone, Debug)]
pub struct OperatorBindings {
    pub intake:         TriggerId,
    pub intake_release: TriggerId,
    pub shoot:          TriggerId,
    pub cancel_shot:    TriggerId,
    pub cancel_intake:  TriggerId,
    pub system_active:  TriggerId,
}

/// The assembled robot: everything the host loop needs before the first tick.
pub struct RobotContainer {
    scheduler:     Scheduler,
    selectors:     SelectorRegistry,
    drive_mode:    Selector<DriveMode>,
    auto_pattern:  Selector<AutoPattern>,
    input:         OperatorInput,
    subsystems:    Subsystems,
    default_drive: BehaviorId,
    autonomous:    BehaviorId,
    bindings:      OperatorBindings,
}

impl RobotContainer {
    /// Build every resource, default behavior, selector and binding.
    ///
    /// Selector presets named by `config.presets` are applied last; a
    /// failing row aborts assembly.
    pub fn new(config: &RobotConfig) -> RobotResult<Self> {
        config.validate()?;

        let mut builder = SchedulerBuilder::new(config.loop_config.clone());
        let ids = SubsystemIds {
            drive:   builder.resource("drive"),
            lights:  builder.resource("lights"),
            intake:  builder.resource("intake"),
            shooter: builder.resource("shooter"),
        };
        let subsystems = Subsystems::new(ids);
        let input = OperatorInput::new();

        // ── Selectors ─────────────────────────────────────────────────────
        let drive_mode = Selector::new(DRIVE_MODE_SELECTOR, DriveMode::Tank.to_string(), DriveMode::Tank)
            .with_option(DriveMode::DualStickArcade.to_string(), DriveMode::DualStickArcade)
            .with_option(DriveMode::SingleStickArcade.to_string(), DriveMode::SingleStickArcade);
        let auto_pattern = Selector::new(AUTO_PATTERN_SELECTOR, AutoPattern::DoNothing.to_string(), AutoPattern::DoNothing)
            .with_option(AutoPattern::DriveForward.to_string(), AutoPattern::DriveForward)
            .with_option(AutoPattern::ThreeNote.to_string(), AutoPattern::ThreeNote);

        let mut selectors = SelectorRegistry::new();
        selectors.publish(&drive_mode)?;
        selectors.publish(&auto_pattern)?;
        drive_mode.on_change(|mode| tracing::info!(%mode, "drive mode selected; applies when the default drive restarts"));
        auto_pattern.on_change(|pattern| tracing::info!(%pattern, "auto pattern selected"));

        // ── Default drive ─────────────────────────────────────────────────
        // Rebuilt on every (re)start, so a new drive mode applies the next
        // time the default drive takes over.
        let default_drive = {
            let mode = drive_mode.clone();
            let input = input.clone();
            let subsystems = subsystems.clone();
            let tuning = config.drive.clone();
            let factory = BehaviorFactory::new("defaultDrive", move || {
                DefaultDrive::new(mode.get(), input.clone(), subsystems.clone(), tuning.clone())
            });
            builder.default_behavior(ids.drive, Deferred::new(factory, [ids.drive]))
        };

        // ── Autonomous ────────────────────────────────────────────────────
        let autonomous_id = {
            let pattern = auto_pattern.clone();
            let requirements = autonomous_requirements(&subsystems);
            let subsystems = subsystems.clone();
            let (auto, mechanisms) = (config.auto.clone(), config.mechanisms.clone());
            let factory = BehaviorFactory::boxed("autonomous", move || {
                autonomous(pattern.get(), &subsystems, &auto, &mechanisms)
            });
            builder.register(Deferred::new(factory, requirements))
        };

        // ── Operator bindings ─────────────────────────────────────────────
        let intake_factory = {
            let subsystems = subsystems.clone();
            let speed = config.mechanisms.intake_speed;
            BehaviorFactory::new("intakeNote", move || intake_note(&subsystems, speed))
        };
        let shoot_factory = {
            let subsystems = subsystems.clone();
            let tuning = config.mechanisms.clone();
            BehaviorFactory::new("shootNote", move || ShootNote::new(subsystems.clone(), tuning.clone()))
        };
        let lights_factory = {
            let lights = Rc::clone(&subsystems.lights);
            BehaviorFactory::new("enableLights", move || {
                let lights = Rc::clone(&lights);
                InstantBehavior::new("enableLights", move || lights.borrow_mut().set_enabled())
            })
        };

        let intake = builder.bind(Binding::start(
            Trigger::new("intakeButton", input.button(|pad| pad.intake)),
            intake_factory,
        ));
        let intake_release = builder.bind(Binding::cancel(
            Trigger::on_falling("intakeRelease", input.button(|pad| pad.intake)),
            CancelTarget::StartedBy(intake),
        ));
        let shoot = builder.bind(Binding::start(
            Trigger::new("shootButton", input.button(|pad| pad.shoot)),
            shoot_factory,
        ));
        let cancel_shot = builder.bind(Binding::cancel(
            Trigger::new("cancelShot", input.button(|pad| pad.cancel)),
            CancelTarget::StartedBy(shoot),
        ));
        let cancel_intake = builder.bind(Binding::cancel(
            Trigger::new("cancelIntake", input.button(|pad| pad.cancel)),
            CancelTarget::StartedBy(intake),
        ));
        let system_active = builder.bind(Binding::start(
            Trigger::new("systemActive", input.system_active()),
            lights_factory,
        ));

        let scheduler = builder.build()?;

        if let Some(path) = &config.presets {
            tracing::debug!(path = %path.display(), "applying selector presets");
            selectors.apply_presets_csv(path)?;
        }

        tracing::info!(
            drive_mode = %drive_mode.selected_label(),
            auto_pattern = %auto_pattern.selected_label(),
            "robot container assembled"
        );

        Ok(Self {
            scheduler,
            selectors,
            drive_mode,
            auto_pattern,
            input,
            subsystems,
            default_drive,
            autonomous: autonomous_id,
            bindings: OperatorBindings {
                intake,
                intake_release,
                shoot,
                cancel_shot,
                cancel_intake,
                system_active,
            },
        })
    }

    /// The behavior for the autonomous phase.
    ///
    /// Its routine is built from the auto-pattern selection each time it
    /// starts, so the host passes this id to `run_exclusively` on every
    /// transition into autonomous.
    pub fn autonomous_behavior(&self) -> BehaviorId {
        self.autonomous
    }

    pub fn default_drive(&self) -> BehaviorId {
        self.default_drive
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    pub fn selectors(&self) -> &SelectorRegistry {
        &self.selectors
    }

    pub fn drive_mode(&self) -> &Selector<DriveMode> {
        &self.drive_mode
    }

    pub fn auto_pattern(&self) -> &Selector<AutoPattern> {
        &self.auto_pattern
    }

    pub fn input(&self) -> &OperatorInput {
        &self.input
    }

    pub fn subsystems(&self) -> &Subsystems {
        &self.subsystems
    }

    pub fn bindings(&self) -> OperatorBindings {
        self.bindings
    }

    /// Apply a selector preset file after assembly.
    pub fn apply_presets(&self, path: &Path) -> RobotResult<usize> {
        Ok(self.selectors.apply_presets_csv(path)?)
    }
}
