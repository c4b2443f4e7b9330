//! Report generation job - assembles a workflow's final report.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use geoflow_core::{Report, Task, TaskReport, TaskStatus};
use geoflow_store::{ResultStore, TaskStore, WorkflowStore};

use crate::{Job, JobError};

/// Builds the final report for a workflow from its tasks' persisted results.
///
/// The engine's report gate guarantees this job only runs once every
/// non-report task in the workflow has completed. The assembled report text
/// is written to the workflow's `final_result` and the serialized report is
/// returned as the task output.
pub struct ReportGenerationJob {
    task_store: Arc<dyn TaskStore>,
    result_store: Arc<dyn ResultStore>,
    workflow_store: Arc<dyn WorkflowStore>,
}

impl ReportGenerationJob {
    /// Create a report job over the given stores.
    pub fn new(
        task_store: Arc<dyn TaskStore>,
        result_store: Arc<dyn ResultStore>,
        workflow_store: Arc<dyn WorkflowStore>,
    ) -> Self {
        Self {
            task_store,
            result_store,
            workflow_store,
        }
    }

    /// Assemble the report over all non-report tasks of the workflow.
    async fn generate_report(&self, task: &Task) -> Result<Report, JobError> {
        let mut report = Report {
            workflow_id: Some(task.workflow_id.clone()),
            ..Report::default()
        };

        let tasks = self.task_store.find_by_workflow(&task.workflow_id).await?;

        for workflow_task in tasks.iter().filter(|t| !t.is_report()) {
            let task_report = self.generate_task_report(workflow_task).await;
            report.final_report.push_str(&format!(
                "Task {} - Output: {}\n",
                workflow_task.task_type,
                task_report.output.as_deref().unwrap_or("null")
            ));
            report.tasks.push(task_report);
        }

        Ok(report)
    }

    /// Build one task's report entry from its latest persisted result.
    async fn generate_task_report(&self, task: &Task) -> TaskReport {
        let output = match self.result_store.find_by_task(&task.id).await {
            Ok(result) => {
                let data = result.map(|r| r.data);
                if task.status == TaskStatus::Failed {
                    Some(format!(
                        "Task failed with error: {}",
                        data.unwrap_or_else(|| "Unknown error".to_string())
                    ))
                } else {
                    data
                }
            }
            Err(e) => {
                warn!(task_id = %task.id, error = %e, "Failed to fetch task result");
                Some("Error fetching task result".to_string())
            }
        };

        TaskReport {
            task_id: task.id.clone(),
            task_type: task.task_type.clone(),
            output,
        }
    }

    /// Persist the report text on the owning workflow.
    async fn save_report_to_workflow(&self, task: &Task, report: &Report) -> Result<(), JobError> {
        let Some(mut workflow) = self.workflow_store.get(&task.workflow_id).await? else {
            return Ok(());
        };

        workflow.final_result = Some(report.final_report.clone());
        self.workflow_store.save(&workflow).await?;
        Ok(())
    }
}

#[async_trait]
impl Job for ReportGenerationJob {
    async fn run(&self, task: &Task) -> Result<String, JobError> {
        info!(task_id = %task.id, workflow_id = %task.workflow_id, "Running report generation");

        let report = self.generate_report(task).await?;
        self.save_report_to_workflow(task, &report).await?;

        serde_json::to_string(&report)
            .map_err(|e| JobError::ExecutionFailed(format!("Failed to serialize report: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoflow_core::{Workflow, WorkflowResult};
    use geoflow_store::MemoryStore;

    async fn seed_completed_task(
        store: &Arc<MemoryStore>,
        workflow: &Workflow,
        task_type: &str,
        step: u32,
        output: &str,
    ) -> Task {
        let mut task = Task::new(workflow.id.clone(), "client-1", task_type, step, "{}");
        task.status = TaskStatus::Completed;
        let result = WorkflowResult::success(task.id.clone(), output);
        task.result_id = Some(result.id.clone());
        TaskStore::save(store.as_ref(), &task).await.unwrap();
        ResultStore::save(store.as_ref(), &result).await.unwrap();
        task
    }

    fn report_job(store: &Arc<MemoryStore>) -> ReportGenerationJob {
        ReportGenerationJob::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_report_concatenates_outputs_in_step_order() {
        let store = MemoryStore::new();
        let workflow = Workflow::new("client-1");
        WorkflowStore::save(store.as_ref(), &workflow).await.unwrap();

        seed_completed_task(&store, &workflow, "polygon_area", 1, "12345.6").await;
        seed_completed_task(&store, &workflow, "notify", 2, "sent").await;

        let report_task = Task::new(workflow.id.clone(), "client-1", "report", 3, "{}");
        let output = report_job(&store).run(&report_task).await.unwrap();

        let report: Report = serde_json::from_str(&output).unwrap();
        assert_eq!(report.tasks.len(), 2);
        assert_eq!(
            report.final_report,
            "Task polygon_area - Output: 12345.6\nTask notify - Output: sent\n"
        );

        let saved = WorkflowStore::get(store.as_ref(), &workflow.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.final_result.as_deref(), Some(report.final_report.as_str()));
    }

    #[tokio::test]
    async fn test_report_excludes_report_tasks() {
        let store = MemoryStore::new();
        let workflow = Workflow::new("client-1");
        WorkflowStore::save(store.as_ref(), &workflow).await.unwrap();

        seed_completed_task(&store, &workflow, "polygon_area", 1, "1.0").await;
        let report_task = Task::new(workflow.id.clone(), "client-1", "report", 2, "{}");
        TaskStore::save(store.as_ref(), &report_task).await.unwrap();

        let output = report_job(&store).run(&report_task).await.unwrap();
        let report: Report = serde_json::from_str(&output).unwrap();
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].task_type, "polygon_area");
    }

    #[tokio::test]
    async fn test_report_renders_failed_task() {
        let store = MemoryStore::new();
        let workflow = Workflow::new("client-1");
        WorkflowStore::save(store.as_ref(), &workflow).await.unwrap();

        let mut failed = Task::new(workflow.id.clone(), "client-1", "polygon_area", 1, "{}");
        failed.status = TaskStatus::Failed;
        let result = WorkflowResult::success(failed.id.clone(), r#"{"error":"bad ring"}"#);
        TaskStore::save(store.as_ref(), &failed).await.unwrap();
        ResultStore::save(store.as_ref(), &result).await.unwrap();

        let report_task = Task::new(workflow.id.clone(), "client-1", "report", 2, "{}");
        let output = report_job(&store).run(&report_task).await.unwrap();

        let report: Report = serde_json::from_str(&output).unwrap();
        let entry = &report.tasks[0];
        assert!(entry
            .output
            .as_deref()
            .unwrap()
            .starts_with("Task failed with error:"));
    }
}
