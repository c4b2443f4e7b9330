//! Status enums for Tasks and Workflows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a Task in its execution lifecycle.
///
/// Transitions are driven exclusively by the task runner:
/// `Queued -> InProgress -> {Completed, Failed}`. There are no retries and
/// no re-queueing of terminal tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task created but not yet picked up by the scheduler.
    #[default]
    Queued,
    /// Task is executing its job.
    InProgress,
    /// Task completed successfully.
    Completed,
    /// Task failed (gate failure or job error).
    Failed,
}

impl TaskStatus {
    /// Returns true if the task is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Aggregate status of a Workflow, derived from its tasks' statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Workflow created, no task has reached a terminal state yet.
    #[default]
    Initial,
    /// At least one task has run but the workflow is not done.
    InProgress,
    /// Every owned task completed successfully.
    Completed,
    /// At least one owned task failed.
    Failed,
}

impl WorkflowStatus {
    /// Returns true if the workflow is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Initial => "initial",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}
