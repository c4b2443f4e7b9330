//! Geoflow task-execution engine.
//!
//! The engine has two moving parts:
//! - [`TaskRunner`] drives one task through its status lifecycle: dependency
//!   and report gates, job dispatch, result persistence, and workflow status
//!   aggregation.
//! - [`Scheduler`] polls the task store for queued tasks and fans each batch
//!   out to the runner with bounded concurrency, containing failures per
//!   task.

pub mod config;
pub mod error;
pub mod runner;
pub mod scheduler;

pub use config::EngineConfig;
pub use error::EngineError;
pub use runner::{aggregate_status, RunOutcome, TaskRunner};
pub use scheduler::Scheduler;
