//! Job errors.

use thiserror::Error;

/// Errors raised by job resolution and execution.
#[derive(Debug, Error)]
pub enum JobError {
    /// No job is registered for the task type.
    #[error("No job registered for task type: {0}")]
    UnknownTaskType(String),

    /// The task's input payload could not be parsed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The job itself failed.
    #[error("Job execution failed: {0}")]
    ExecutionFailed(String),

    /// A store operation failed inside the job.
    #[error(transparent)]
    Store(#[from] geoflow_store::StoreError),
}
