//! Trigger bindings — what happens when a trigger fires.
//!
//! | Action                       | On fire                                        |
//! |------------------------------|------------------------------------------------|
//! | `Start { target, refire }`   | Acquire `target`; re-fire obeys `RefirePolicy` |
//! | `Cancel(CancelTarget)`       | Interrupt a behavior if it is running          |
//! | `Toggle(target)`             | Interrupt `target` if running, else start it   |
//!
//! A [`Target::Factory`] produces a fresh transient behavior per start; the
//! binding remembers the id of the last one so that re-fires, toggles and
//! [`CancelTarget::StartedBy`] can find it.

use std::fmt;

use tc_behavior::BehaviorFactory;
use tc_core::{BehaviorId, TriggerId};
use tc_trigger::Trigger;

/// What to do when a `Start` binding fires while its previous behavior is
/// still running.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RefirePolicy {
    /// Keep the running instance; the fire is a no-op.
    #[default]
    IgnoreWhileRunning,
    /// Interrupt the running instance and start again (a fresh instance for
    /// factory targets).
    Restart,
}

/// The behavior a binding starts or toggles.
pub enum Target {
    Factory(BehaviorFactory),
    Registered(BehaviorId),
}

impl From<BehaviorFactory> for Target {
    fn from(factory: BehaviorFactory) -> Self {
        Target::Factory(factory)
    }
}

impl From<BehaviorId> for Target {
    fn from(id: BehaviorId) -> Self {
        Target::Registered(id)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Factory(factory) => f.debug_tuple("Factory").field(&factory.name()).finish(),
            Target::Registered(id) => f.debug_tuple("Registered").field(id).finish(),
        }
    }
}

/// The behavior a `Cancel` binding interrupts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CancelTarget {
    Behavior(BehaviorId),
    /// Whatever the binding with this id started, while that run lasts.
    StartedBy(TriggerId),
}

#[derive(Debug)]
pub enum BindingAction {
    Start { target: Target, refire: RefirePolicy },
    Cancel(CancelTarget),
    Toggle(Target),
}

/// A trigger paired with its action.
#[derive(Debug)]
pub struct Binding {
    pub(crate) trigger:      Trigger,
    pub(crate) action:       BindingAction,
    pub(crate) last_started: Option<BehaviorId>,
}

impl Binding {
    pub fn new(trigger: Trigger, action: BindingAction) -> Self {
        Self { trigger, action, last_started: None }
    }

    /// Start `target` on every fire, ignoring re-fires while it runs.
    pub fn start(trigger: Trigger, target: impl Into<Target>) -> Self {
        Self::new(trigger, BindingAction::Start {
            target: target.into(),
            refire: RefirePolicy::default(),
        })
    }

    pub fn cancel(trigger: Trigger, target: CancelTarget) -> Self {
        Self::new(trigger, BindingAction::Cancel(target))
    }

    pub fn toggle(trigger: Trigger, target: impl Into<Target>) -> Self {
        Self::new(trigger, BindingAction::Toggle(target.into()))
    }

    /// Set the re-fire policy.  Ignored for `Cancel` and `Toggle` bindings.
    pub fn with_refire(mut self, policy: RefirePolicy) -> Self {
        if let BindingAction::Start { refire, .. } = &mut self.action {
            *refire = policy;
        }
        self
    }

    pub fn name(&self) -> &str {
        self.trigger.name()
    }

    pub fn action(&self) -> &BindingAction {
        &self.action
    }

    /// Id of the behavior this binding started, cleared when that run ends.
    pub fn last_started(&self) -> Option<BehaviorId> {
        self.last_started
    }
}
