// ABOUTME: Shared application state for the base64-gate HTTP server.
// ABOUTME: Holds the immutable configuration and the OpenAPI document rendered at startup.

use std::sync::Arc;

use utoipa::openapi::OpenApi;

use crate::config::ServerConfig;
use crate::docs;

/// Shared application state accessible by all Axum handlers.
/// Built once at startup and never mutated.
pub struct AppState {
    pub config: ServerConfig,
    pub openapi: OpenApi,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create a new AppState from the loaded configuration.
    pub fn new(config: ServerConfig) -> Self {
        let openapi = docs::build_openapi(&config.public_base_url());
        Self { config, openapi }
    }
}
