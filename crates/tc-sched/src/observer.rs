//! Scheduler observer trait for status reporting and data collection.

use tc_core::{BehaviorId, Tick, TriggerId};
use tc_trigger::Transition;

/// Callbacks invoked by [`Scheduler::tick_with`][crate::Scheduler::tick_with]
/// at key points in a tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Only changes made while a tick is being
/// processed are reported; direct calls such as `Scheduler::cancel` between
/// ticks are visible through `tracing` alone.
///
/// # Example — status printer
///
/// ```rust,ignore
/// struct StatusPrinter { interval: u64 }
///
/// impl SchedulerObserver for StatusPrinter {
///     fn on_tick_end(&mut self, tick: Tick, running: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {running} behaviors running");
///         }
///     }
/// }
/// ```
pub trait SchedulerObserver {
    /// Called at the very start of each tick, before queued requests apply.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after default backfill.  `running` counts behaviors that are
    /// Running at the end of the tick.
    fn on_tick_end(&mut self, _tick: Tick, _running: usize) {}

    /// A trigger fired.  Reported before its action is performed.
    fn on_trigger_fired(&mut self, _tick: Tick, _trigger: TriggerId, _transition: Transition) {}

    /// A behavior acquired its resources; reported before `initialize` runs.
    fn on_behavior_start(&mut self, _tick: Tick, _id: BehaviorId, _name: &str) {}

    /// A behavior ended and released its resources.
    fn on_behavior_end(&mut self, _tick: Tick, _id: BehaviorId, _name: &str, _interrupted: bool) {}
}

/// A [`SchedulerObserver`] that does nothing.
pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {}
