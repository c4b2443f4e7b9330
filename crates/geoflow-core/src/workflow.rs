//! Workflow entity.

use crate::{WorkflowId, WorkflowStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task type reserved for report generation. Report tasks are gated until
/// every other task in their workflow has completed.
pub const REPORT_TASK_TYPE: &str = "report";

/// A Workflow owns a set of tasks and carries their aggregate status.
///
/// The status field is a pure function of the owned tasks' statuses; it is
/// recomputed by the task runner after every terminal task outcome and is
/// never written by any other path. Task rows live in the task store, not
/// inline here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique workflow identifier.
    pub id: WorkflowId,

    /// Client that requested the workflow.
    pub client_id: String,

    /// Aggregate status derived from the owned tasks.
    pub status: WorkflowStatus,

    /// Final report text, populated only by report generation.
    pub final_result: Option<String>,

    /// When the workflow was created.
    pub created_at: DateTime<Utc>,
}

impl Workflow {
    /// Create a new workflow in the Initial state.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            id: WorkflowId::generate(),
            client_id: client_id.into(),
            status: WorkflowStatus::Initial,
            final_result: None,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set a specific ID (useful for testing).
    pub fn with_id(mut self, id: WorkflowId) -> Self {
        self.id = id;
        self
    }
}
