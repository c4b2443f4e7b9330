//! Geoflow Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Storage backends
//! - Runtime specifics
//!
//! All types here represent the core business domain of Geoflow: workflows,
//! the tasks they own, and the persisted results of task runs.

pub mod ids;
pub mod report;
pub mod result;
pub mod status;
pub mod task;
pub mod workflow;

// Re-export commonly used types
pub use ids::{ResultId, TaskId, WorkflowId};
pub use report::{Report, TaskReport};
pub use result::WorkflowResult;
pub use status::{TaskStatus, WorkflowStatus};
pub use task::Task;
pub use workflow::{Workflow, REPORT_TASK_TYPE};
