//! Closure-backed behaviors for the common one-liners.
//!
//! | Type                 | Lifecycle                                          |
//! |----------------------|----------------------------------------------------|
//! | `FunctionalBehavior` | One closure per lifecycle step                     |
//! | `InstantBehavior`    | Runs once in `initialize`, finished immediately    |
//! | `RunBehavior`        | Runs every tick, never finishes                    |
//! | `WaitTicks`          | Finishes after N executions                        |

use tc_core::ResourceId;

use crate::{Behavior, BehaviorContext, Requirements};

// ── FunctionalBehavior ────────────────────────────────────────────────────────

/// A behavior assembled from closures.
///
/// ```rust,ignore
/// let spin_up = FunctionalBehavior::new("spin_up")
///     .requires(shooter_id)
///     .on_initialize(move || shooter.borrow_mut().set_speed(1.0))
///     .finished_when(move || at_speed.get())
///     .on_end(move |_| shooter2.borrow_mut().stop());
/// ```
pub struct FunctionalBehavior {
    name:         String,
    requirements: Requirements,
    on_init:      Box<dyn FnMut()>,
    on_execute:   Box<dyn FnMut()>,
    on_end:       Box<dyn FnMut(bool)>,
    finished:     Box<dyn Fn() -> bool>,
}

impl FunctionalBehavior {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:         name.into(),
            requirements: Requirements::new(),
            on_init:      Box::new(|| {}),
            on_execute:   Box::new(|| {}),
            on_end:       Box::new(|_| {}),
            finished:     Box::new(|| false),
        }
    }

    pub fn requires(mut self, resource: ResourceId) -> Self {
        self.requirements.insert(resource);
        self
    }

    pub fn on_initialize(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_init = Box::new(f);
        self
    }

    pub fn on_execute(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_execute = Box::new(f);
        self
    }

    pub fn on_end(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_end = Box::new(f);
        self
    }

    pub fn finished_when(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.finished = Box::new(f);
        self
    }
}

impl Behavior for FunctionalBehavior {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements.clone()
    }

    fn initialize(&mut self, _ctx: &mut BehaviorContext<'_>) {
        (self.on_init)();
    }

    fn execute(&mut self, _ctx: &mut BehaviorContext<'_>) {
        (self.on_execute)();
    }

    fn is_finished(&self) -> bool {
        (self.finished)()
    }

    fn end(&mut self, interrupted: bool) {
        (self.on_end)(interrupted);
    }
}

// ── InstantBehavior ───────────────────────────────────────────────────────────

/// Runs `action` once when started and finishes on the same tick.
pub struct InstantBehavior {
    name:         String,
    requirements: Requirements,
    action:       Box<dyn FnMut()>,
}

impl InstantBehavior {
    pub fn new(name: impl Into<String>, action: impl FnMut() + 'static) -> Self {
        Self {
            name:         name.into(),
            requirements: Requirements::new(),
            action:       Box::new(action),
        }
    }

    pub fn requires(mut self, resource: ResourceId) -> Self {
        self.requirements.insert(resource);
        self
    }
}

impl Behavior for InstantBehavior {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements.clone()
    }

    fn initialize(&mut self, _ctx: &mut BehaviorContext<'_>) {
        (self.action)();
    }

    fn is_finished(&self) -> bool {
        true
    }
}

// ── RunBehavior ───────────────────────────────────────────────────────────────

/// Runs `action` every tick until interrupted.  Typical default behavior.
pub struct RunBehavior {
    name:         String,
    requirements: Requirements,
    action:       Box<dyn FnMut()>,
    on_end:       Option<Box<dyn FnMut(bool)>>,
}

impl RunBehavior {
    pub fn new(name: impl Into<String>, action: impl FnMut() + 'static) -> Self {
        Self {
            name:         name.into(),
            requirements: Requirements::new(),
            action:       Box::new(action),
            on_end:       None,
        }
    }

    pub fn requires(mut self, resource: ResourceId) -> Self {
        self.requirements.insert(resource);
        self
    }

    /// Cleanup to run when the behavior is interrupted (e.g. stop motors).
    pub fn on_end(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }
}

impl Behavior for RunBehavior {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements.clone()
    }

    fn execute(&mut self, _ctx: &mut BehaviorContext<'_>) {
        (self.action)();
    }

    fn end(&mut self, interrupted: bool) {
        if let Some(f) = self.on_end.as_mut() {
            f(interrupted);
        }
    }
}

// ── WaitTicks ─────────────────────────────────────────────────────────────────

/// Finishes after it has been executed `ticks` times.  Requires nothing.
pub struct WaitTicks {
    ticks:   u64,
    elapsed: u64,
}

impl WaitTicks {
    pub fn new(ticks: u64) -> Self {
        Self { ticks, elapsed: 0 }
    }
}

impl Behavior for WaitTicks {
    fn name(&self) -> &str {
        "wait"
    }

    fn initialize(&mut self, _ctx: &mut BehaviorContext<'_>) {
        self.elapsed = 0;
    }

    fn execute(&mut self, _ctx: &mut BehaviorContext<'_>) {
        self.elapsed += 1;
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.ticks
    }
}
