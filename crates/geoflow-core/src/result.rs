//! Persisted task run outcomes.

use crate::{ResultId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted outcome of one task run: the job's output on success, or a
/// failure payload on error.
///
/// Rows are append-only: every terminal run outcome creates a new row rather
/// than updating an existing one, so the result store doubles as an audit
/// log. `Task::result_id` points at the latest row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// Unique result identifier.
    pub id: ResultId,

    /// Task this result belongs to.
    pub task_id: TaskId,

    /// Serialized output or failure payload.
    pub data: String,

    /// When the result was recorded.
    pub created_at: DateTime<Utc>,
}

impl WorkflowResult {
    /// Record a successful run's output.
    pub fn success(task_id: TaskId, output: impl Into<String>) -> Self {
        Self {
            id: ResultId::generate(),
            task_id,
            data: output.into(),
            created_at: Utc::now(),
        }
    }

    /// Record a failed run. The payload always carries the human-readable
    /// error message so a failure row is never an empty object.
    pub fn failure(task_id: TaskId, error: &impl std::fmt::Display) -> Self {
        let payload = serde_json::json!({ "error": error.to_string() });
        Self {
            id: ResultId::generate(),
            task_id,
            data: payload.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result_keeps_output() {
        let task_id = TaskId::generate();
        let result = WorkflowResult::success(task_id.clone(), "42.5");
        assert_eq!(result.task_id, task_id);
        assert_eq!(result.data, "42.5");
    }

    #[test]
    fn test_failure_result_captures_message() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let result = WorkflowResult::failure(TaskId::generate(), &err);
        let value: serde_json::Value = serde_json::from_str(&result.data).unwrap();
        assert_eq!(value["error"], "boom");
    }
}
