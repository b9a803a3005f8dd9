//! Scheduling requests — the changes a behavior can ask for mid-tick.

use std::fmt;

use tc_core::BehaviorId;

use crate::Behavior;

/// A scheduling change requested from inside a behavior.
///
/// Requests are produced through [`BehaviorContext`][crate::BehaviorContext]
/// and consumed by the scheduler at the start of the following tick, in the
/// order they were issued.
pub enum Request {
    /// Register `behavior` as transient and start it.
    Start(Box<dyn Behavior>),

    /// Start a behavior that is already registered.
    StartRegistered(BehaviorId),

    /// End a running behavior with `interrupted = true`.
    Cancel(BehaviorId),

    /// Phase-style exclusive start; `None` stops every non-default behavior.
    RunExclusively(Option<BehaviorId>),
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Start(b)           => f.debug_tuple("Start").field(&b.name()).finish(),
            Request::StartRegistered(i) => f.debug_tuple("StartRegistered").field(i).finish(),
            Request::Cancel(i)          => f.debug_tuple("Cancel").field(i).finish(),
            Request::RunExclusively(i)  => f.debug_tuple("RunExclusively").field(i).finish(),
        }
    }
}
