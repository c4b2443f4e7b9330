//! Report assembly types for report-generation tasks.

use crate::{TaskId, WorkflowId};
use serde::{Deserialize, Serialize};

/// Aggregated report over a workflow's tasks, serialized as the report
/// task's output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Workflow the report covers.
    pub workflow_id: Option<WorkflowId>,

    /// Per-task entries, in task iteration order.
    pub tasks: Vec<TaskReport>,

    /// Concatenated human-readable report text.
    pub final_report: String,
}

/// One task's entry in a workflow report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    /// Task the entry covers.
    pub task_id: TaskId,

    /// Task type.
    pub task_type: String,

    /// The task's output, or a failure description.
    pub output: Option<String>,
}
