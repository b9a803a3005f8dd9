use tc_sched::SchedError;
use tc_select::SelectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("robot configuration error: {0}")]
    Config(String),

    #[error("scheduler assembly failed: {0}")]
    Sched(#[from] SchedError),

    #[error("selector error: {0}")]
    Select(#[from] SelectError),

    #[error("could not read configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RobotResult<T> = Result<T, RobotError>;
