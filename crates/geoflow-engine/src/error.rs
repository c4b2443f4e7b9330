//! Engine errors.

use std::time::Duration;

use thiserror::Error;

use geoflow_jobs::JobError;
use geoflow_store::StoreError;

/// Errors raised while running a task.
///
/// Every variant is fatal to the single task it occurred in; the scheduler
/// catches them per task so a failure never aborts sibling tasks or the
/// polling loop.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The task's dependency reached the Failed state.
    #[error("Dependency task \"{task_type}\" failed")]
    DependencyFailed { task_type: String },

    /// The task's dependency did not reach a terminal state in time.
    #[error("Timed out after {waited:?} waiting for dependency task \"{task_type}\"")]
    DependencyTimeout { task_type: String, waited: Duration },

    /// Job resolution or execution failed.
    #[error(transparent)]
    Job(#[from] JobError),

    /// A persistence operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
