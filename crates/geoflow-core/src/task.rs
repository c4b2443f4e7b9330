//! Task entity.

use crate::{ResultId, TaskStatus, WorkflowId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Task is one unit of work within a workflow.
///
/// Tasks are created Queued by workflow creation and mutated only by the
/// task runner; they are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: crate::TaskId,

    /// Workflow this task belongs to.
    pub workflow_id: WorkflowId,

    /// Client that requested the workflow.
    pub client_id: String,

    /// Task type, selects the job implementation.
    pub task_type: String,

    /// Fetch-ordering hint within the workflow. Affects only the order
    /// queued tasks are returned in, not execution order.
    pub step_number: u32,

    /// Current task status.
    pub status: TaskStatus,

    /// Human-readable progress marker, set while the task is in progress.
    pub progress: Option<String>,

    /// Task type this task depends on, resolved within the same workflow.
    pub dependency: Option<String>,

    /// Latest persisted result for this task, once terminal.
    pub result_id: Option<ResultId>,

    /// Opaque input payload (GeoJSON or other serialized data).
    pub input: String,

    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new Queued task.
    pub fn new(
        workflow_id: WorkflowId,
        client_id: impl Into<String>,
        task_type: impl Into<String>,
        step_number: u32,
        input: impl Into<String>,
    ) -> Self {
        Self {
            id: crate::TaskId::generate(),
            workflow_id,
            client_id: client_id.into(),
            task_type: task_type.into(),
            step_number,
            status: TaskStatus::Queued,
            progress: None,
            dependency: None,
            result_id: None,
            input: input.into(),
            created_at: Utc::now(),
        }
    }

    /// Builder method to set a dependency on another task type.
    pub fn with_dependency(mut self, task_type: impl Into<String>) -> Self {
        self.dependency = Some(task_type.into());
        self
    }

    /// Builder method to set a specific ID (useful for testing).
    pub fn with_id(mut self, id: crate::TaskId) -> Self {
        self.id = id;
        self
    }

    /// Check if the task is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Check if this is a report task.
    pub fn is_report(&self) -> bool {
        self.task_type == crate::REPORT_TASK_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_queued() {
        let task = Task::new(WorkflowId::generate(), "client-1", "polygon_area", 1, "{}");
        assert_eq!(task.status, TaskStatus::Queued);
        assert!(task.progress.is_none());
        assert!(task.result_id.is_none());
        assert!(!task.is_terminal());
    }

    #[test]
    fn test_with_dependency() {
        let task = Task::new(WorkflowId::generate(), "client-1", "report", 2, "{}")
            .with_dependency("polygon_area");
        assert_eq!(task.dependency.as_deref(), Some("polygon_area"));
        assert!(task.is_report());
    }
}
