//! Geoflow server.
//!
//! Wires the in-memory stores, the job registry, the task-execution engine,
//! and the HTTP surface together into a single process.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod factory;
mod http;
mod state;

use config::Config;
use geoflow_core::REPORT_TASK_TYPE;
use geoflow_engine::{Scheduler, TaskRunner};
use geoflow_jobs::{JobRegistry, PolygonAreaJob, ReportGenerationJob};
use geoflow_store::{MemoryStore, ResultStore, TaskStore, WorkflowStore};
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load config
    let config = Config::default();
    let http_addr: SocketAddr = config.http_bind_addr.parse()?;

    // Stores: one in-memory backend serves all three contracts
    let store = MemoryStore::new();
    let task_store: Arc<dyn TaskStore> = store.clone();
    let workflow_store: Arc<dyn WorkflowStore> = store.clone();
    let result_store: Arc<dyn ResultStore> = store.clone();

    // Job registry
    let mut registry = JobRegistry::new();
    registry.register("polygon_area", Arc::new(PolygonAreaJob));
    registry.register(
        REPORT_TASK_TYPE,
        Arc::new(ReportGenerationJob::new(
            task_store.clone(),
            result_store.clone(),
            workflow_store.clone(),
        )),
    );
    let registry = Arc::new(registry);

    // Engine
    let runner = Arc::new(TaskRunner::new(
        task_store.clone(),
        workflow_store.clone(),
        result_store.clone(),
        registry,
        config.engine.clone(),
    ));
    let scheduler = Scheduler::new(task_store.clone(), runner, config.engine.clone());

    // HTTP surface
    let app_state = AppState::new(task_store, workflow_store);
    let router = http::create_router(app_state);

    let cancel = CancellationToken::new();

    // Ctrl-C stops scheduling and drains in-flight work
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
                cancel.cancel();
            }
        }
    });

    let listener = TcpListener::bind(http_addr).await?;
    info!(http_addr = %http_addr, "Starting geoflow server");

    let http_server = axum::serve(listener, router).with_graceful_shutdown({
        let cancel = cancel.clone();
        async move { cancel.cancelled().await }
    });

    // Run the HTTP server and the scheduler loop concurrently
    tokio::select! {
        result = http_server => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
            }
        }
        _ = scheduler.run(cancel.clone()) => {}
    }

    Ok(())
}
