//! In-memory store backing all three persistence contracts.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use geoflow_core::{ResultId, Task, TaskId, TaskStatus, Workflow, WorkflowId, WorkflowResult};

use crate::{ResultStore, StoreError, TaskStore, WorkflowStore};

/// In-memory implementation of the task, workflow, and result stores.
///
/// Each map is guarded by its own lock, so single-row operations are atomic
/// but no operation spans rows transactionally. Results are kept in an
/// append-only vector to preserve recording order.
#[derive(Default)]
pub struct MemoryStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
    workflows: RwLock<HashMap<WorkflowId, Workflow>>,
    results: RwLock<Vec<WorkflowResult>>,
}

impl MemoryStore {
    /// Create a new empty store wrapped in Arc.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of tasks currently stored.
    pub async fn task_count(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Number of result rows recorded so far.
    pub async fn result_count(&self) -> usize {
        self.results.read().await.len()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn find_queued(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        let mut queued: Vec<Task> = tasks
            .values()
            .filter(|t| t.status == TaskStatus::Queued)
            .cloned()
            .collect();
        queued.sort_by_key(|t| t.step_number);
        Ok(queued)
    }

    async fn find_by_workflow(&self, workflow_id: &WorkflowId) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|t| &t.workflow_id == workflow_id)
            .cloned()
            .collect();
        owned.sort_by_key(|t| t.step_number);
        Ok(owned)
    }

    async fn find_by_type(
        &self,
        workflow_id: &WorkflowId,
        task_type: &str,
    ) -> Result<Option<Task>, StoreError> {
        let owned = self.find_by_workflow(workflow_id).await?;
        Ok(owned.into_iter().find(|t| t.task_type == task_type))
    }

    async fn get(&self, task_id: &TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(task_id).cloned())
    }

    async fn save(&self, task: &Task) -> Result<(), StoreError> {
        self.tasks
            .write()
            .await
            .insert(task.id.clone(), task.clone());
        Ok(())
    }
}

#[async_trait]
impl WorkflowStore for MemoryStore {
    async fn get(&self, workflow_id: &WorkflowId) -> Result<Option<Workflow>, StoreError> {
        Ok(self.workflows.read().await.get(workflow_id).cloned())
    }

    async fn save(&self, workflow: &Workflow) -> Result<(), StoreError> {
        self.workflows
            .write()
            .await
            .insert(workflow.id.clone(), workflow.clone());
        Ok(())
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn find_by_task(&self, task_id: &TaskId) -> Result<Option<WorkflowResult>, StoreError> {
        let results = self.results.read().await;
        Ok(results
            .iter()
            .rev()
            .find(|r| &r.task_id == task_id)
            .cloned())
    }

    async fn get(&self, result_id: &ResultId) -> Result<Option<WorkflowResult>, StoreError> {
        let results = self.results.read().await;
        Ok(results.iter().find(|r| &r.id == result_id).cloned())
    }

    async fn save(&self, result: &WorkflowResult) -> Result<(), StoreError> {
        self.results.write().await.push(result.clone());
        Ok(())
    }
}
