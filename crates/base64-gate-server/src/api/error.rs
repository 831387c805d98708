// ABOUTME: Error type returned by base64-gate handlers and middleware.
// ABOUTME: Every error renders as a JSON body of the form {"message": ...} with a matching status code.

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64_gate_core::CodecError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const MISSING_INPUT: &str = "Please provide an input";
pub const INPUT_NOT_STRING: &str = "Input must be a string";
pub const MALFORMED_BODY: &str = "Request body must be a JSON object";
pub const INVALID_BASE64: &str = "Input is not valid Base64";
pub const INVALID_UTF8: &str = "Decoded input is not valid UTF-8 text";
pub const MISSING_API_KEY: &str = "Please provide an API key";
pub const INVALID_API_KEY: &str = "Please provide a valid API key";
pub const BODY_TOO_LARGE: &str = "Request body is too large";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// JSON body carrying a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced to API callers. None of them are retryable.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body is too large")]
    PayloadTooLarge,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl From<CodecError> for ApiError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::InvalidBase64(_) => ApiError::BadRequest(INVALID_BASE64.to_string()),
            CodecError::InvalidUtf8(_) => ApiError::BadRequest(INVALID_UTF8.to_string()),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            tracing::debug!(error = %rejection.body_text(), "failed to read request body");
            ApiError::BadRequest(MALFORMED_BODY.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = %status, message = %self, "request rejected");
        (status, Json(MessageBody::new(self.to_string()))).into_response()
    }
}
