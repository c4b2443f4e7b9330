//! Job registry - maps task-type strings to job implementations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Job, JobError};

/// Maps a task-type string to a [`Job`] instance.
///
/// The set of jobs is fixed at construction; there is no dynamic
/// registration after the registry is handed to the engine.
#[derive(Default)]
pub struct JobRegistry {
    jobs: HashMap<String, Arc<dyn Job>>,
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job under a task type, replacing any previous entry.
    pub fn register(&mut self, task_type: impl Into<String>, job: Arc<dyn Job>) {
        self.jobs.insert(task_type.into(), job);
    }

    /// Resolve the job for a task type.
    pub fn resolve(&self, task_type: &str) -> Result<Arc<dyn Job>, JobError> {
        self.jobs
            .get(task_type)
            .cloned()
            .ok_or_else(|| JobError::UnknownTaskType(task_type.to_string()))
    }

    /// Task types with a registered job.
    pub fn registered_types(&self) -> Vec<&str> {
        self.jobs.keys().map(|k| k.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use geoflow_core::Task;

    struct EchoJob;

    #[async_trait]
    impl Job for EchoJob {
        async fn run(&self, task: &Task) -> Result<String, JobError> {
            Ok(task.input.clone())
        }
    }

    #[test]
    fn test_resolve_unknown_type() {
        let registry = JobRegistry::new();
        let err = registry.resolve("nope").err().unwrap();
        assert!(matches!(err, JobError::UnknownTaskType(t) if t == "nope"));
    }

    #[test]
    fn test_resolve_registered_job() {
        let mut registry = JobRegistry::new();
        registry.register("echo", Arc::new(EchoJob));
        assert!(registry.resolve("echo").is_ok());
        assert_eq!(registry.registered_types(), vec!["echo"]);
    }
}
