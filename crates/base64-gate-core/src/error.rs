// ABOUTME: Error types for the base64-gate codec.
// ABOUTME: Separates malformed Base64 from Base64 that decodes to non-UTF-8 bytes, and rejects unknown decode modes.

use thiserror::Error;

/// Errors that can occur when decoding text.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("decoded bytes are not valid utf-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// A decode mode name other than "strict" or "lenient".
#[derive(Debug, Error)]
#[error("unknown decode mode: {0} (expected \"strict\" or \"lenient\")")]
pub struct UnknownDecodeMode(pub String);
