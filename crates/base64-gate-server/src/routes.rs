// ABOUTME: Route definitions and the public handlers for the base64-gate HTTP API.
// ABOUTME: Assembles open and key-protected routes into a single Axum Router with shared state.

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::api::{ApiError, MessageBody};
use crate::app_state::SharedState;
use crate::auth::AuthLayer;
use crate::docs;

pub const WELCOME_MESSAGE: &str = "Welcome to the Base64 Encoder/Decoder API";

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/encode", post(api::codec::encode))
        .route("/decode", post(api::codec::decode))
        .route_layer(AuthLayer::new(state.config.api_key.clone()));

    Router::new()
        .route("/", get(root))
        .route(docs::DOCS_PATH, get(docs::docs_page))
        .route(docs::OPENAPI_JSON_PATH, get(docs::openapi_json))
        .merge(protected)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(state.config.body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Welcome message. Open to every caller.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = MessageBody))
)]
pub async fn root() -> Json<MessageBody> {
    Json(MessageBody::new(WELCOME_MESSAGE))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
