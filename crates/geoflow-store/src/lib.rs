//! Geoflow persistence contracts.
//!
//! The engine talks to storage only through the three async traits in this
//! crate: [`TaskStore`], [`WorkflowStore`], and [`ResultStore`]. Backends
//! guarantee atomic single-row reads and writes; nothing here assumes
//! cross-row transactions. The bundled [`MemoryStore`] implements all three
//! over in-memory maps.

pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use async_trait::async_trait;

use geoflow_core::{ResultId, Task, TaskId, Workflow, WorkflowId, WorkflowResult};

/// Persistence for tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks with status Queued, ascending by step number.
    async fn find_queued(&self) -> Result<Vec<Task>, StoreError>;

    /// All tasks belonging to a workflow, ascending by step number.
    async fn find_by_workflow(&self, workflow_id: &WorkflowId) -> Result<Vec<Task>, StoreError>;

    /// First task of the given type within a workflow, in step-number order.
    async fn find_by_type(
        &self,
        workflow_id: &WorkflowId,
        task_type: &str,
    ) -> Result<Option<Task>, StoreError>;

    /// Look up a single task by id.
    async fn get(&self, task_id: &TaskId) -> Result<Option<Task>, StoreError>;

    /// Insert or update a task row.
    async fn save(&self, task: &Task) -> Result<(), StoreError>;
}

/// Persistence for workflows.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Look up a single workflow by id.
    async fn get(&self, workflow_id: &WorkflowId) -> Result<Option<Workflow>, StoreError>;

    /// Insert or update a workflow row.
    async fn save(&self, workflow: &Workflow) -> Result<(), StoreError>;
}

/// Persistence for task results.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Latest result recorded for a task, if any.
    async fn find_by_task(&self, task_id: &TaskId) -> Result<Option<WorkflowResult>, StoreError>;

    /// Look up a single result by id.
    async fn get(&self, result_id: &ResultId) -> Result<Option<WorkflowResult>, StoreError>;

    /// Append a result row. Results are never mutated or deleted.
    async fn save(&self, result: &WorkflowResult) -> Result<(), StoreError>;
}
