//! `BehaviorExt` — fluent composition on any [`Behavior`].

use crate::{
    Behavior, BehaviorResult, Named, Parallel, ParallelPolicy, Sequence, Timeout, Until,
};

/// Extension trait that adds composition helpers to every `Behavior`.
///
/// ```rust,ignore
/// let auto = drive_forward(drive, 0.5)
///     .with_timeout(100)
///     .and_then(shoot(shooter))
///     .named("drive_and_shoot");
/// ```
pub trait BehaviorExt: Behavior + Sized {
    /// Run `self`, then `next`.
    fn and_then(self, next: impl Behavior) -> Sequence {
        let name = format!("{}>{}", self.name(), next.name());
        Sequence::new(name, vec![self.boxed(), next.boxed()])
    }

    /// Run `self` and `other` together until both finish.
    fn along_with(self, other: impl Behavior) -> BehaviorResult<Parallel> {
        let name = format!("{}&{}", self.name(), other.name());
        Parallel::new(name, ParallelPolicy::All, vec![self.boxed(), other.boxed()])
    }

    /// Run `self` and `other` together until either finishes.
    fn race_with(self, other: impl Behavior) -> BehaviorResult<Parallel> {
        let name = format!("{}|{}", self.name(), other.name());
        Parallel::new(name, ParallelPolicy::Race, vec![self.boxed(), other.boxed()])
    }

    /// Run `other` alongside `self`, stopping it when `self` finishes.
    fn deadline_for(self, other: impl Behavior) -> BehaviorResult<Parallel> {
        let name = format!("{}~{}", self.name(), other.name());
        Parallel::new(name, ParallelPolicy::Deadline, vec![self.boxed(), other.boxed()])
    }

    /// Stop early once `condition` holds.
    fn until(self, condition: impl FnMut() -> bool + 'static) -> Until<Self> {
        Until::new(self, condition)
    }

    /// Stop after at most `ticks` executions.
    fn with_timeout(self, ticks: u64) -> Timeout<Self> {
        Timeout::new(self, ticks)
    }

    fn named(self, name: impl Into<String>) -> Named<Self> {
        Named::new(self, name)
    }

    fn boxed(self) -> Box<dyn Behavior> {
        Box::new(self)
    }
}

impl<B: Behavior + Sized> BehaviorExt for B {}
