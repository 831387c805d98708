// ABOUTME: Core library for base64-gate, containing the text codec and its error types.
// ABOUTME: Pure transformations with no I/O, shared by the HTTP server and the CLI.

pub mod codec;
pub mod error;

pub use codec::{DecodeMode, decode, encode};
pub use error::{CodecError, UnknownDecodeMode};
