use tc_core::ResourceId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("parallel group {group:?}: more than one child requires {resource}")]
    OverlappingRequirements {
        group:    String,
        resource: ResourceId,
    },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
