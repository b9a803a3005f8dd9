use tc_core::{BehaviorId, CoreError, ResourceId, TriggerId};
use thiserror::Error;

/// Composition-time validation failures reported by
/// [`SchedulerBuilder::build`][crate::SchedulerBuilder::build].
///
/// Runtime operations never fail; see the [`Scheduler`][crate::Scheduler]
/// docs.
#[derive(Debug, Error)]
pub enum SchedError {
    #[error("loop configuration error: {0}")]
    Core(#[from] CoreError),

    #[error("{0} was never declared")]
    UnknownResource(ResourceId),

    #[error("resource name {0:?} declared twice")]
    DuplicateResource(String),

    #[error("default behavior {behavior:?} for {resource:?} does not require it")]
    DefaultMissingRequirement {
        resource: String,
        behavior: String,
    },

    #[error("default behavior {behavior:?} for {resource:?} also requires {other}")]
    DefaultRequiresOther {
        resource: String,
        behavior: String,
        other:    ResourceId,
    },

    #[error("resource {0:?} already has a default behavior")]
    DefaultAlreadySet(String),

    #[error("binding {binding:?} targets unknown {behavior}")]
    UnknownBehavior {
        binding:  String,
        behavior: BehaviorId,
    },

    #[error("binding {binding:?} cancels the behavior of unknown {trigger}")]
    UnknownTrigger {
        binding: String,
        trigger: TriggerId,
    },
}

pub type SchedResult<T> = Result<T, SchedError>;
