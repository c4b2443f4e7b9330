//! Shared application state for the HTTP surface.

use std::sync::Arc;

use geoflow_store::{TaskStore, WorkflowStore};

/// Shared application state.
pub struct AppState {
    /// Task persistence.
    pub task_store: Arc<dyn TaskStore>,

    /// Workflow persistence.
    pub workflow_store: Arc<dyn WorkflowStore>,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(task_store: Arc<dyn TaskStore>, workflow_store: Arc<dyn WorkflowStore>) -> Arc<Self> {
        Arc::new(Self {
            task_store,
            workflow_store,
        })
    }
}
