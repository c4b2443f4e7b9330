//! HTTP request and response types.

use serde::{Deserialize, Serialize};

/// Request body for workflow creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnalysisRequest {
    /// Client requesting the analysis.
    pub client_id: String,

    /// GeoJSON payload handed to every task in the workflow.
    pub geo_json: serde_json::Value,
}

/// Response body for workflow creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnalysisResponse {
    pub workflow_id: String,
    pub message: String,
}

/// Response body for the workflow status endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatusResponse {
    pub workflow_id: String,
    pub status: String,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

/// Response body for the workflow results endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResultResponse {
    pub workflow_id: String,
    pub status: String,
    pub final_result: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
