//! Server configuration.

use geoflow_engine::EngineConfig;

/// Server configuration.
pub struct Config {
    /// HTTP server bind address.
    pub http_bind_addr: String,

    /// Engine timing and concurrency settings.
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind_addr: "127.0.0.1:3000".to_string(),
            engine: EngineConfig::default(),
        }
    }
}
