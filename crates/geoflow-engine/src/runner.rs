//! Task runner - the per-task state machine.
//!
//! `run` drives a single task through: dependency gate, report gate, mark
//! in progress, job dispatch, result persistence, and workflow status
//! recomputation. Gates either pass, skip (task stays Queued and is
//! re-polled later), or fail the run.

use std::sync::Arc;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use geoflow_core::{Task, TaskStatus, WorkflowId, WorkflowResult, WorkflowStatus};
use geoflow_jobs::JobRegistry;
use geoflow_store::{ResultStore, TaskStore, WorkflowStore};

use crate::{EngineConfig, EngineError};

/// Outcome of a non-failing task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The task ran its job and reached Completed.
    Completed,
    /// A gate was not satisfied; the task is untouched and will be
    /// re-attempted on the next scheduler poll.
    Skipped,
}

/// Result of a gate check.
enum Gate {
    Pass,
    Skip,
}

/// Runs one task at a time, enforcing gating preconditions and folding the
/// outcome into the owning workflow's status.
pub struct TaskRunner {
    task_store: Arc<dyn TaskStore>,
    workflow_store: Arc<dyn WorkflowStore>,
    result_store: Arc<dyn ResultStore>,
    registry: Arc<JobRegistry>,
    config: EngineConfig,
}

impl TaskRunner {
    /// Create a new TaskRunner.
    pub fn new(
        task_store: Arc<dyn TaskStore>,
        workflow_store: Arc<dyn WorkflowStore>,
        result_store: Arc<dyn ResultStore>,
        registry: Arc<JobRegistry>,
        config: EngineConfig,
    ) -> Self {
        Self {
            task_store,
            workflow_store,
            result_store,
            registry,
            config,
        }
    }

    /// Run a single task through its lifecycle.
    ///
    /// Failures are persisted (Failed status plus a result row) and then
    /// re-raised so the caller can log them; a skip leaves the task Queued.
    pub async fn run(
        &self,
        mut task: Task,
        cancel: &CancellationToken,
    ) -> Result<RunOutcome, EngineError> {
        info!(task_id = %task.id, task_type = %task.task_type, "Starting task run");

        match self.check_dependency(&task, cancel).await {
            Ok(Gate::Skip) => return Ok(RunOutcome::Skipped),
            Ok(Gate::Pass) => {}
            Err(
                e @ (EngineError::DependencyFailed { .. }
                | EngineError::DependencyTimeout { .. }),
            ) => {
                self.handle_failure(&mut task, &e).await?;
                return Err(e);
            }
            // A store error here happened before any status mutation: the
            // task stays Queued and is retried on the next poll.
            Err(e) => return Err(e),
        }

        match self.check_report_gate(&task).await? {
            Gate::Skip => return Ok(RunOutcome::Skipped),
            Gate::Pass => {}
        }

        if let Err(e) = self.execute(&mut task).await {
            self.handle_failure(&mut task, &e).await?;
            return Err(e);
        }

        self.update_workflow_status(&task.workflow_id).await?;
        Ok(RunOutcome::Completed)
    }

    /// Dependency gate.
    ///
    /// A missing dependency task is a skip. A Failed dependency fails the
    /// run. A dependency that has not completed yet is waited on in place,
    /// re-querying at a fixed interval until it reaches a terminal state,
    /// the configured timeout elapses, or the engine is cancelled.
    async fn check_dependency(
        &self,
        task: &Task,
        cancel: &CancellationToken,
    ) -> Result<Gate, EngineError> {
        let Some(dep_type) = task.dependency.as_deref() else {
            return Ok(Gate::Pass);
        };

        info!(
            task_id = %task.id,
            dependency = dep_type,
            "Task has a dependency, checking"
        );

        let started = Instant::now();
        let deadline = self.config.dependency_timeout.map(|t| started + t);

        let Some(mut dep_task) = self
            .task_store
            .find_by_type(&task.workflow_id, dep_type)
            .await?
        else {
            info!(
                task_id = %task.id,
                dependency = dep_type,
                "Dependency task not found, skipping for now"
            );
            return Ok(Gate::Skip);
        };

        loop {
            match dep_task.status {
                TaskStatus::Completed => {
                    debug!(task_id = %task.id, dependency = dep_type, "Dependency completed");
                    return Ok(Gate::Pass);
                }
                TaskStatus::Failed => {
                    return Err(EngineError::DependencyFailed {
                        task_type: dep_type.to_string(),
                    });
                }
                TaskStatus::Queued | TaskStatus::InProgress => {}
            }

            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return Err(EngineError::DependencyTimeout {
                        task_type: dep_type.to_string(),
                        waited: started.elapsed(),
                    });
                }
            }

            debug!(
                task_id = %task.id,
                dependency = dep_type,
                "Waiting for dependency task to complete"
            );

            tokio::select! {
                _ = cancel.cancelled() => return Ok(Gate::Skip),
                _ = sleep(self.config.dependency_poll_interval) => {}
            }

            dep_task = match self
                .task_store
                .find_by_type(&task.workflow_id, dep_type)
                .await?
            {
                Some(t) => t,
                None => return Ok(Gate::Skip),
            };
        }
    }

    /// Report gate. Report tasks wait, non-blocking, until every other task
    /// in their workflow has completed.
    async fn check_report_gate(&self, task: &Task) -> Result<Gate, EngineError> {
        if !task.is_report() {
            return Ok(Gate::Pass);
        }

        let tasks = self.task_store.find_by_workflow(&task.workflow_id).await?;
        let all_completed = tasks
            .iter()
            .filter(|t| !t.is_report())
            .all(|t| t.status == TaskStatus::Completed);

        if !all_completed {
            info!(
                task_id = %task.id,
                workflow_id = %task.workflow_id,
                "Not all workflow tasks completed, skipping report for now"
            );
            return Ok(Gate::Skip);
        }

        info!(
            task_id = %task.id,
            workflow_id = %task.workflow_id,
            "All workflow tasks completed, proceeding with report generation"
        );
        Ok(Gate::Pass)
    }

    /// Mark the task in progress, dispatch its job, and persist the outcome.
    async fn execute(&self, task: &mut Task) -> Result<(), EngineError> {
        task.status = TaskStatus::InProgress;
        task.progress = Some("starting job...".to_string());
        self.task_store.save(task).await?;

        let job = self.registry.resolve(&task.task_type)?;
        info!(task_id = %task.id, task_type = %task.task_type, "Starting job");

        let output = job.run(task).await?;

        let result = WorkflowResult::success(task.id.clone(), output);
        self.result_store.save(&result).await?;

        task.result_id = Some(result.id.clone());
        task.status = TaskStatus::Completed;
        task.progress = None;
        self.task_store.save(task).await?;

        info!(task_id = %task.id, task_type = %task.task_type, "Job completed successfully");
        Ok(())
    }

    /// Persist a Failed status and a failure result row, then fold the
    /// outcome into the workflow status.
    async fn handle_failure(&self, task: &mut Task, cause: &EngineError) -> Result<(), EngineError> {
        error!(
            task_id = %task.id,
            task_type = %task.task_type,
            error = %cause,
            "Task run failed"
        );

        task.status = TaskStatus::Failed;
        task.progress = None;
        self.task_store.save(task).await?;

        let result = WorkflowResult::failure(task.id.clone(), cause);
        self.result_store.save(&result).await?;

        self.update_workflow_status(&task.workflow_id).await?;
        Ok(())
    }

    /// Recompute and persist the owning workflow's status from its tasks.
    pub async fn update_workflow_status(
        &self,
        workflow_id: &WorkflowId,
    ) -> Result<(), EngineError> {
        let Some(mut workflow) = self.workflow_store.get(workflow_id).await? else {
            return Ok(());
        };

        let tasks = self.task_store.find_by_workflow(workflow_id).await?;
        workflow.status = aggregate_status(&tasks);
        self.workflow_store.save(&workflow).await?;

        debug!(workflow_id = %workflow_id, status = %workflow.status, "Workflow status updated");
        Ok(())
    }
}

/// Pure aggregation of a workflow's status from its tasks' statuses.
///
/// Idempotent and order-independent: any Failed task fails the workflow,
/// all-Completed completes it, anything else is InProgress.
pub fn aggregate_status(tasks: &[Task]) -> WorkflowStatus {
    let any_failed = tasks.iter().any(|t| t.status == TaskStatus::Failed);
    let all_completed = tasks.iter().all(|t| t.status == TaskStatus::Completed);

    if any_failed {
        WorkflowStatus::Failed
    } else if all_completed {
        WorkflowStatus::Completed
    } else {
        WorkflowStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_status(workflow_id: &WorkflowId, status: TaskStatus) -> Task {
        let mut task = Task::new(workflow_id.clone(), "client-1", "polygon_area", 1, "{}");
        task.status = status;
        task
    }

    #[test]
    fn test_aggregate_any_failed_wins() {
        let wf_id = WorkflowId::generate();
        let tasks = vec![
            task_with_status(&wf_id, TaskStatus::Completed),
            task_with_status(&wf_id, TaskStatus::Failed),
            task_with_status(&wf_id, TaskStatus::Queued),
        ];
        assert_eq!(aggregate_status(&tasks), WorkflowStatus::Failed);
    }

    #[test]
    fn test_aggregate_all_completed() {
        let wf_id = WorkflowId::generate();
        let tasks = vec![
            task_with_status(&wf_id, TaskStatus::Completed),
            task_with_status(&wf_id, TaskStatus::Completed),
        ];
        assert_eq!(aggregate_status(&tasks), WorkflowStatus::Completed);
    }

    #[test]
    fn test_aggregate_otherwise_in_progress() {
        let wf_id = WorkflowId::generate();
        let tasks = vec![
            task_with_status(&wf_id, TaskStatus::Completed),
            task_with_status(&wf_id, TaskStatus::Queued),
        ];
        assert_eq!(aggregate_status(&tasks), WorkflowStatus::InProgress);

        let tasks = vec![
            task_with_status(&wf_id, TaskStatus::InProgress),
            task_with_status(&wf_id, TaskStatus::Queued),
        ];
        assert_eq!(aggregate_status(&tasks), WorkflowStatus::InProgress);
    }

    #[test]
    fn test_aggregate_idempotent() {
        let wf_id = WorkflowId::generate();
        let tasks = vec![
            task_with_status(&wf_id, TaskStatus::Completed),
            task_with_status(&wf_id, TaskStatus::Failed),
        ];
        assert_eq!(aggregate_status(&tasks), aggregate_status(&tasks));
    }
}
