// ABOUTME: API module containing the HTTP handler functions for the base64-gate REST API.
// ABOUTME: Organized into the codec handlers and the shared JSON error type.

pub mod codec;
pub mod error;

pub use error::{ApiError, MessageBody};
