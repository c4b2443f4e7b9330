//! Workflow creation from a step definition.

use std::sync::Arc;

use tracing::info;

use geoflow_core::{Task, Workflow, REPORT_TASK_TYPE};
use geoflow_store::{StoreError, TaskStore, WorkflowStore};

/// One step of a workflow definition.
pub struct StepDefinition {
    pub task_type: &'static str,
    pub step_number: u32,
    pub dependency: Option<&'static str>,
}

/// An ordered set of steps instantiated per workflow request.
pub struct WorkflowDefinition {
    pub steps: Vec<StepDefinition>,
}

/// The built-in analysis definition: compute the polygon area, then report
/// over the workflow once everything else is done.
pub fn analysis_definition() -> WorkflowDefinition {
    WorkflowDefinition {
        steps: vec![
            StepDefinition {
                task_type: "polygon_area",
                step_number: 1,
                dependency: None,
            },
            StepDefinition {
                task_type: REPORT_TASK_TYPE,
                step_number: 2,
                dependency: Some("polygon_area"),
            },
        ],
    }
}

/// Create a workflow and its Queued tasks from a definition.
///
/// Every task receives the request's input payload; the engine picks the
/// tasks up on its next poll.
pub async fn create_workflow(
    definition: &WorkflowDefinition,
    client_id: &str,
    input: &str,
    workflow_store: &Arc<dyn WorkflowStore>,
    task_store: &Arc<dyn TaskStore>,
) -> Result<Workflow, StoreError> {
    let workflow = Workflow::new(client_id);
    workflow_store.save(&workflow).await?;

    for step in &definition.steps {
        let mut task = Task::new(
            workflow.id.clone(),
            client_id,
            step.task_type,
            step.step_number,
            input,
        );
        if let Some(dependency) = step.dependency {
            task = task.with_dependency(dependency);
        }
        task_store.save(&task).await?;
    }

    info!(
        workflow_id = %workflow.id,
        client_id = client_id,
        steps = definition.steps.len(),
        "Workflow created with queued tasks"
    );

    Ok(workflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoflow_core::TaskStatus;
    use geoflow_store::MemoryStore;

    #[tokio::test]
    async fn test_create_workflow_queues_definition_steps() {
        let store = MemoryStore::new();
        let task_store: Arc<dyn TaskStore> = store.clone();
        let workflow_store: Arc<dyn WorkflowStore> = store.clone();

        let workflow = create_workflow(
            &analysis_definition(),
            "client-1",
            r#"{"type":"Feature"}"#,
            &workflow_store,
            &task_store,
        )
        .await
        .unwrap();

        let tasks = task_store.find_by_workflow(&workflow.id).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.status == TaskStatus::Queued));
        assert_eq!(tasks[0].task_type, "polygon_area");
        assert_eq!(tasks[1].task_type, REPORT_TASK_TYPE);
        assert_eq!(tasks[1].dependency.as_deref(), Some("polygon_area"));
    }
}
