//! The `Behavior` trait — the main extension point for user code.

use std::collections::BTreeSet;

use tc_core::ResourceId;

use crate::BehaviorContext;

/// The set of resources a behavior must own while it runs.
///
/// A `BTreeSet` keeps iteration in ascending `ResourceId` order so that
/// interruption during acquisition happens in a deterministic order.
pub type Requirements = BTreeSet<ResourceId>;

/// A unit of work with a bounded lifecycle that drives zero or more resources.
///
/// The scheduler calls the lifecycle methods in this order:
///
/// ```text
/// initialize ─► (execute ─► is_finished)* ─► end(interrupted)
/// ```
///
/// `initialize` runs exactly once per start, inside the acquisition step.
/// `execute` and `is_finished` run once per tick while the behavior owns its
/// resources.  `end(false)` follows the first `is_finished() == true`;
/// `end(true)` is delivered instead when another behavior takes one of the
/// resources or the behavior is cancelled.
///
/// # Requirements
///
/// [`requirements`][Self::requirements] is read once, when the behavior is
/// registered with the scheduler, and must not change afterwards.  An empty
/// set is valid: such behaviors never contend with anything.
///
/// # Scheduling from inside a behavior
///
/// Behaviors never touch the scheduler directly.  They push requests into the
/// [`BehaviorContext`]; the scheduler applies them at the start of the next
/// tick.
///
/// # Example
///
/// ```rust,ignore
/// struct Spin { drive: ResourceId, output: Shared<DriveOutput> }
///
/// impl Behavior for Spin {
///     fn requirements(&self) -> Requirements { [self.drive].into() }
///     fn execute(&mut self, _ctx: &mut BehaviorContext<'_>) {
///         self.output.borrow_mut().set(0.5, -0.5);
///     }
///     fn end(&mut self, _interrupted: bool) {
///         self.output.borrow_mut().stop();
///     }
/// }
/// ```
pub trait Behavior: 'static {
    /// Human-readable name used in logs and observer callbacks.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Resources this behavior must own exclusively while running.
    fn requirements(&self) -> Requirements {
        Requirements::new()
    }

    /// Called once when the behavior starts, after every conflicting owner
    /// has been ended.
    fn initialize(&mut self, _ctx: &mut BehaviorContext<'_>) {}

    /// Called once per tick while running.
    fn execute(&mut self, _ctx: &mut BehaviorContext<'_>) {}

    /// Completion predicate, checked right after each `execute`.
    ///
    /// Default: never finishes (runs until interrupted).
    fn is_finished(&self) -> bool {
        false
    }

    /// Called once when the behavior stops.  `interrupted` is `true` when the
    /// completion predicate was bypassed.
    fn end(&mut self, _interrupted: bool) {}
}

impl<B: Behavior + ?Sized> Behavior for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn requirements(&self) -> Requirements {
        (**self).requirements()
    }

    fn initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        (**self).initialize(ctx);
    }

    fn execute(&mut self, ctx: &mut BehaviorContext<'_>) {
        (**self).execute(ctx);
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }

    fn end(&mut self, interrupted: bool) {
        (**self).end(interrupted);
    }
}
