//! Engine configuration.

use std::time::Duration;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Sleep between scheduler poll cycles.
    pub poll_interval: Duration,

    /// Sleep between dependency re-queries while a task waits for its
    /// dependency to complete.
    pub dependency_poll_interval: Duration,

    /// Upper bound on how long a task may wait for its dependency before the
    /// run fails with a DependencyTimeout. `None` waits indefinitely.
    pub dependency_timeout: Option<Duration>,

    /// Maximum tasks executing concurrently within one batch.
    pub max_concurrent_tasks: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            dependency_poll_interval: Duration::from_secs(5),
            dependency_timeout: Some(Duration::from_secs(600)),
            max_concurrent_tasks: 16,
        }
    }
}
