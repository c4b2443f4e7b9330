//! Geoflow job implementations.
//!
//! A [`Job`] is the pluggable execution logic bound to a task's type. The
//! engine resolves jobs through the [`JobRegistry`] and invokes them with the
//! task being run; a job returns its output as a string or fails with a
//! [`JobError`].

pub mod error;
pub mod polygon_area;
pub mod registry;
pub mod report_generation;

pub use error::JobError;
pub use polygon_area::PolygonAreaJob;
pub use registry::JobRegistry;
pub use report_generation::ReportGenerationJob;

use async_trait::async_trait;

use geoflow_core::Task;

/// A unit of work identified by a task-type string.
///
/// Implementations must be re-entrant: a task whose gates are not yet
/// satisfied is skipped and re-dispatched on a later poll, so `run` may be
/// invoked more than once for the same task.
#[async_trait]
pub trait Job: Send + Sync {
    /// Execute the job for the given task, returning its output.
    async fn run(&self, task: &Task) -> Result<String, JobError>;
}
