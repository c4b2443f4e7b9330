//! HTTP handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::error;

use geoflow_core::{TaskStatus, WorkflowId, WorkflowStatus};

use crate::factory;
use crate::http::responses::{
    CreateAnalysisRequest, CreateAnalysisResponse, ErrorResponse, WorkflowResultResponse,
    WorkflowStatusResponse,
};
use crate::state::AppState;

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Create a workflow from the built-in analysis definition.
pub async fn create_analysis(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAnalysisRequest>,
) -> impl IntoResponse {
    let input = request.geo_json.to_string();

    match factory::create_workflow(
        &factory::analysis_definition(),
        &request.client_id,
        &input,
        &state.workflow_store,
        &state.task_store,
    )
    .await
    {
        Ok(workflow) => (
            StatusCode::ACCEPTED,
            Json(CreateAnalysisResponse {
                workflow_id: workflow.id.into_inner(),
                message: "Workflow created and tasks queued from definition".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create workflow");
            internal_error("Failed to create workflow")
        }
    }
}

/// Report a workflow's aggregate status and task progress counts.
pub async fn workflow_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let workflow_id = WorkflowId::from(id);

    let workflow = match state.workflow_store.get(&workflow_id).await {
        Ok(Some(workflow)) => workflow,
        Ok(None) => return not_found(),
        Err(e) => {
            error!(workflow_id = %workflow_id, error = %e, "Failed to retrieve workflow status");
            return internal_error("Failed to retrieve workflow status");
        }
    };

    let tasks = match state.task_store.find_by_workflow(&workflow.id).await {
        Ok(tasks) => tasks,
        Err(e) => {
            error!(workflow_id = %workflow_id, error = %e, "Failed to retrieve workflow tasks");
            return internal_error("Failed to retrieve workflow status");
        }
    };

    let completed_tasks = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();

    (
        StatusCode::ACCEPTED,
        Json(WorkflowStatusResponse {
            workflow_id: workflow.id.into_inner(),
            status: workflow.status.to_string(),
            completed_tasks,
            total_tasks: tasks.len(),
        }),
    )
        .into_response()
}

/// Report a completed workflow's final result.
pub async fn workflow_results(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let workflow_id = WorkflowId::from(id);

    let workflow = match state.workflow_store.get(&workflow_id).await {
        Ok(Some(workflow)) => workflow,
        Ok(None) => return not_found(),
        Err(e) => {
            error!(workflow_id = %workflow_id, error = %e, "Failed to retrieve workflow results");
            return internal_error("Failed to retrieve workflow results");
        }
    };

    if workflow.status != WorkflowStatus::Completed {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                message: "Workflow is not yet completed".to_string(),
            }),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(WorkflowResultResponse {
            workflow_id: workflow.id.into_inner(),
            status: workflow.status.to_string(),
            final_result: workflow.final_result,
        }),
    )
        .into_response()
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "Workflow not found".to_string(),
        }),
    )
        .into_response()
}

fn internal_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoflow_core::{Task, Workflow};
    use geoflow_store::{MemoryStore, TaskStore, WorkflowStore};

    fn app_state(store: &Arc<MemoryStore>) -> Arc<AppState> {
        AppState::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_status_unknown_workflow_is_404() {
        let store = MemoryStore::new();
        let response = workflow_status(
            State(app_state(&store)),
            Path("does-not-exist".to_string()),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_status_counts_completed_tasks() {
        let store = MemoryStore::new();
        let workflow = Workflow::new("client-1");
        WorkflowStore::save(store.as_ref(), &workflow).await.unwrap();

        let mut done = Task::new(workflow.id.clone(), "client-1", "polygon_area", 1, "{}");
        done.status = TaskStatus::Completed;
        TaskStore::save(store.as_ref(), &done).await.unwrap();
        let pending = Task::new(workflow.id.clone(), "client-1", "report", 2, "{}");
        TaskStore::save(store.as_ref(), &pending).await.unwrap();

        let response = workflow_status(
            State(app_state(&store)),
            Path(workflow.id.as_str().to_string()),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["completedTasks"], 1);
        assert_eq!(body["totalTasks"], 2);
    }

    #[tokio::test]
    async fn test_results_rejected_until_completed() {
        let store = MemoryStore::new();
        let mut workflow = Workflow::new("client-1");
        WorkflowStore::save(store.as_ref(), &workflow).await.unwrap();

        let response = workflow_results(
            State(app_state(&store)),
            Path(workflow.id.as_str().to_string()),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        workflow.status = WorkflowStatus::Completed;
        workflow.final_result = Some("Task polygon_area - Output: 42\n".to_string());
        WorkflowStore::save(store.as_ref(), &workflow).await.unwrap();

        let response = workflow_results(
            State(app_state(&store)),
            Path(workflow.id.as_str().to_string()),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["finalResult"], "Task polygon_area - Output: 42\n");
    }

    #[tokio::test]
    async fn test_create_analysis_queues_workflow() {
        let store = MemoryStore::new();
        let request = CreateAnalysisRequest {
            client_id: "client-1".to_string(),
            geo_json: serde_json::json!({ "type": "Feature" }),
        };

        let response = create_analysis(State(app_state(&store)), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let workflow_id = WorkflowId::from(body["workflowId"].as_str().unwrap());
        let tasks = TaskStore::find_by_workflow(store.as_ref(), &workflow_id)
            .await
            .unwrap();
        assert_eq!(tasks.len(), 2);
    }
}
