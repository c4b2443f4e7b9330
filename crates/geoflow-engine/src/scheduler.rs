//! Polling scheduler - discovers queued tasks and fans them out to the
//! task runner.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use geoflow_core::Task;
use geoflow_store::TaskStore;

use crate::runner::{RunOutcome, TaskRunner};
use crate::EngineConfig;

/// Repeatedly polls the task store for queued tasks and executes each batch
/// concurrently through the [`TaskRunner`].
///
/// One task's failure never aborts its siblings or the loop: runner errors
/// are logged per task and the batch continues. Cancellation stops new
/// batches; in-flight tasks drain before `run` returns.
pub struct Scheduler {
    task_store: Arc<dyn TaskStore>,
    runner: Arc<TaskRunner>,
    config: EngineConfig,
}

impl Scheduler {
    /// Create a new Scheduler.
    pub fn new(task_store: Arc<dyn TaskStore>, runner: Arc<TaskRunner>, config: EngineConfig) -> Self {
        Self {
            task_store,
            runner,
            config,
        }
    }

    /// Run the polling loop until the token is cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        info!(
            poll_interval = ?self.config.poll_interval,
            max_concurrent_tasks = self.config.max_concurrent_tasks,
            "Scheduler started"
        );

        while !cancel.is_cancelled() {
            debug!("Checking for queued tasks");

            match self.task_store.find_queued().await {
                Ok(tasks) if tasks.is_empty() => {
                    debug!("No queued tasks found");
                }
                Ok(tasks) => {
                    self.run_batch(tasks, &cancel).await;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to poll for queued tasks");
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = sleep(self.config.poll_interval) => {}
            }
        }

        info!("Scheduler stopped");
    }

    /// Execute one batch of queued tasks concurrently, bounded by the
    /// configured concurrency limit, isolating failures per task.
    pub(crate) async fn run_batch(&self, tasks: Vec<Task>, cancel: &CancellationToken) {
        info!(batch_size = tasks.len(), "Executing batch of queued tasks");

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_tasks));

        let handles: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                let semaphore = Arc::clone(&semaphore);
                let runner = Arc::clone(&self.runner);
                let cancel = cancel.clone();

                tokio::spawn(async move {
                    let Ok(_permit) = semaphore.acquire().await else {
                        return;
                    };

                    let task_id = task.id.clone();
                    let task_type = task.task_type.clone();

                    match runner.run(task, &cancel).await {
                        Ok(RunOutcome::Completed) => {
                            debug!(task_id = %task_id, "Task run completed");
                        }
                        Ok(RunOutcome::Skipped) => {
                            debug!(task_id = %task_id, "Task skipped, will retry on next poll");
                        }
                        Err(e) => {
                            error!(
                                task_id = %task_id,
                                task_type = %task_type,
                                error = %e,
                                "Task execution failed"
                            );
                        }
                    }
                })
            })
            .collect();

        for joined in join_all(handles).await {
            if let Err(e) = joined {
                error!(error = %e, "Task execution panicked");
            }
        }
    }
}
