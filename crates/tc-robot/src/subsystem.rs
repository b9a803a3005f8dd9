//! Actuator groups.
//!
//! Drivers are out of scope: each subsystem records the last output it was
//! commanded so the host and tests can observe what the behaviors did.
//! Subsystems are shared between the behaviors that drive them as
//! [`Shared<T>`] handles; the scheduler's resource ownership guarantees only
//! one running behavior writes a given subsystem per tick.

use std::cell::RefCell;
use std::rc::Rc;

use tc_core::ResourceId;

pub type Shared<T> = Rc<RefCell<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

// ── Drive ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Drive {
    left:    f64,
    right:   f64,
    /// Number of output commands received.
    updates: u64,
}

impl Drive {
    pub fn set_motor_speeds(&mut self, left: f64, right: f64) {
        self.left = left.clamp(-1.0, 1.0);
        self.right = right.clamp(-1.0, 1.0);
        self.updates += 1;
    }

    pub fn stop(&mut self) {
        self.set_motor_speeds(0.0, 0.0);
    }

    pub fn speeds(&self) -> (f64, f64) {
        (self.left, self.right)
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }
}

// ── Lights ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LightPattern {
    #[default]
    Off,
    Idle,
    Intaking,
    Shooting,
}

#[derive(Debug, Default)]
pub struct Lights {
    enabled: bool,
    pattern: LightPattern,
}

impl Lights {
    /// Robot became active: show the idle pattern.
    pub fn set_enabled(&mut self) {
        self.enabled = true;
        self.pattern = LightPattern::Idle;
    }

    pub fn set_pattern(&mut self, pattern: LightPattern) {
        self.pattern = pattern;
    }

    /// Back to idle if enabled, off otherwise.
    pub fn clear(&mut self) {
        self.pattern = if self.enabled { LightPattern::Idle } else { LightPattern::Off };
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pattern(&self) -> LightPattern {
        self.pattern
    }
}

// ── Intake / Shooter ──────────────────────────────────────────────────────────

/// Roller intake.  Signals activity on the lights.
#[derive(Debug)]
pub struct Intake {
    speed:  f64,
    lights: Shared<Lights>,
}

impl Intake {
    pub fn new(lights: Shared<Lights>) -> Self {
        Self { speed: 0.0, lights }
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(-1.0, 1.0);
        let mut lights = self.lights.borrow_mut();
        if self.speed == 0.0 {
            lights.clear();
        } else {
            lights.set_pattern(LightPattern::Intaking);
        }
    }

    pub fn stop(&mut self) {
        self.set_speed(0.0);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

/// Flywheel shooter.  Signals activity on the lights.
#[derive(Debug)]
pub struct Shooter {
    speed:  f64,
    lights: Shared<Lights>,
}

impl Shooter {
    pub fn new(lights: Shared<Lights>) -> Self {
        Self { speed: 0.0, lights }
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(-1.0, 1.0);
        let mut lights = self.lights.borrow_mut();
        if self.speed == 0.0 {
            lights.clear();
        } else {
            lights.set_pattern(LightPattern::Shooting);
        }
    }

    pub fn stop(&mut self) {
        self.set_speed(0.0);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

// ── Bundle ────────────────────────────────────────────────────────────────────

/// Every subsystem with the resource id the scheduler tracks it under.
#[derive(Clone)]
pub struct Subsystems {
    pub drive:   Shared<Drive>,
    pub lights:  Shared<Lights>,
    pub intake:  Shared<Intake>,
    pub shooter: Shared<Shooter>,
    pub ids:     SubsystemIds,
}

#[derive(Copy, Clone, Debug)]
pub struct SubsystemIds {
    pub drive:   ResourceId,
    pub lights:  ResourceId,
    pub intake:  ResourceId,
    pub shooter: ResourceId,
}

impl Subsystems {
    pub fn new(ids: SubsystemIds) -> Self {
        let lights = shared(Lights::default());
        Self {
            drive: shared(Drive::default()),
            intake: shared(Intake::new(Rc::clone(&lights))),
            shooter: shared(Shooter::new(Rc::clone(&lights))),
            lights,
            ids,
        }
    }
}
