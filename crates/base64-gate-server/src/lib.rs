// ABOUTME: HTTP server for base64-gate, exposing Base64 encode/decode behind a shared API key.
// ABOUTME: Uses Axum with an immutable shared state built once from environment configuration.

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod docs;
pub mod routes;
pub mod server;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, ServerConfig};
pub use routes::create_router;
pub use server::{run, serve};
