use crate::capabilities::Capabilities;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; nothing is persisted between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Optional parsers and backends, probed once in `main`.
    pub capabilities: Capabilities,
}

impl AppState {
    pub fn new(config: Config, capabilities: Capabilities) -> Self {
        Self {
            config,
            capabilities,
        }
    }
}
