//! Per-call context handed to behavior lifecycle methods.

use tc_core::{BehaviorId, Tick};

use crate::{Behavior, Request};

/// What a behavior can see and do during `initialize` / `execute`.
///
/// The context carries the current tick and the behavior's own id, and owns
/// a borrow of the scheduler's request queue.  Requests pushed here are
/// applied at the start of the *next* tick, so a behavior can never observe
/// a half-applied scheduling change while it is itself being run.
///
/// Composite behaviors forward their context to their children unchanged:
/// a child sees the id of the outermost scheduled behavior.
pub struct BehaviorContext<'a> {
    /// Tick currently being processed.
    pub tick: Tick,

    /// Id of the scheduled behavior this call belongs to.
    pub id: BehaviorId,

    requests: &'a mut Vec<Request>,
}

impl<'a> BehaviorContext<'a> {
    #[inline]
    pub fn new(tick: Tick, id: BehaviorId, requests: &'a mut Vec<Request>) -> Self {
        Self { tick, id, requests }
    }

    /// Queue an arbitrary request.
    pub fn request(&mut self, request: Request) {
        self.requests.push(request);
    }

    /// Queue a fresh behavior to be started next tick.
    pub fn start(&mut self, behavior: impl Behavior) {
        self.requests.push(Request::Start(Box::new(behavior)));
    }

    /// Queue a start of an already-registered behavior.
    pub fn start_registered(&mut self, id: BehaviorId) {
        self.requests.push(Request::StartRegistered(id));
    }

    /// Queue a cancellation.  Cancelling `self.id` stops the calling behavior
    /// next tick with `interrupted = true`.
    pub fn cancel(&mut self, id: BehaviorId) {
        self.requests.push(Request::Cancel(id));
    }

    /// Number of requests queued so far during this tick (all behaviors).
    pub fn pending(&self) -> usize {
        self.requests.len()
    }
}
