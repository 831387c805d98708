// ABOUTME: Encode and decode API handlers that transform the `input` field of a JSON body.
// ABOUTME: The CodecInput extractor enforces the presence and type checks shared by both endpoints.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::api::error::{ApiError, INPUT_NOT_STRING, MALFORMED_BODY, MISSING_INPUT, MessageBody};
use crate::app_state::SharedState;

/// Request body for both codec endpoints.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CodecRequest {
    /// Plain text to encode, or Base64 text to decode.
    #[serde(default)]
    #[schema(value_type = String, example = "hello")]
    pub input: Value,
}

/// Response body with the transformed text.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CodecResponse {
    #[schema(example = "aGVsbG8=")]
    pub output: String,
}

impl CodecRequest {
    /// Parse a raw request body. An empty body counts as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value)
                .map_err(|_| ApiError::BadRequest(MALFORMED_BODY.to_string())),
            _ => Err(ApiError::BadRequest(MALFORMED_BODY.to_string())),
        }
    }

    /// Take the text out of `input`, rejecting falsy and non-string values.
    pub fn into_input(self) -> Result<String, ApiError> {
        if is_falsy(&self.input) {
            return Err(ApiError::BadRequest(MISSING_INPUT.to_string()));
        }
        match self.input {
            Value::String(text) => Ok(text),
            _ => Err(ApiError::BadRequest(INPUT_NOT_STRING.to_string())),
        }
    }
}

/// Falsiness as JSON clients expect it: null, false, zero and "" are "no input".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Extractor yielding the validated `input` string of a codec request.
#[derive(Debug)]
pub struct CodecInput(pub String);

impl<S> FromRequest<S> for CodecInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;

        CodecRequest::from_body(&body)
            .and_then(CodecRequest::into_input)
            .map(CodecInput)
    }
}

/// POST /encode - Base64-encode the UTF-8 bytes of `input`.
#[utoipa::path(
    post,
    path = "/encode",
    tag = "codec",
    summary = "Base64 encode a plain text",
    request_body = CodecRequest,
    responses(
        (status = 200, description = "Encoded text", body = CodecResponse),
        (status = 400, description = "Missing or invalid input", body = MessageBody),
        (status = 401, description = "Missing or invalid API key", body = MessageBody),
    ),
    security(("apiKeyAuth" = []))
)]
pub async fn encode(CodecInput(input): CodecInput) -> Json<CodecResponse> {
    Json(CodecResponse {
        output: base64_gate_core::encode(&input),
    })
}

/// POST /decode - Decode Base64 `input` back into UTF-8 text.
#[utoipa::path(
    post,
    path = "/decode",
    tag = "codec",
    summary = "Base64 decode an encoded text",
    request_body = CodecRequest,
    responses(
        (status = 200, description = "Decoded text", body = CodecResponse),
        (status = 400, description = "Missing input, malformed Base64 or non-UTF-8 output", body = MessageBody),
        (status = 401, description = "Missing or invalid API key", body = MessageBody),
    ),
    security(("apiKeyAuth" = []))
)]
pub async fn decode(
    State(state): State<SharedState>,
    CodecInput(input): CodecInput,
) -> Result<Json<CodecResponse>, ApiError> {
    let output = base64_gate_core::decode(&input, state.config.decode_mode)?;
    Ok(Json(CodecResponse { output }))
}
