// ABOUTME: Base64 encoding and decoding of UTF-8 text using the standard RFC 4648 alphabet.
// ABOUTME: Decoding is strict by default; lenient mode recovers best-effort text from malformed input.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::{CodecError, UnknownDecodeMode};

/// Engine used after lenient normalization: padding optional, trailing bits ignored.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// How `decode` treats input that is not canonical Base64.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Reject malformed Base64 and non-UTF-8 output.
    #[default]
    Strict,
    /// Decode whatever can be recovered and substitute U+FFFD for invalid UTF-8.
    Lenient,
}

impl FromStr for DecodeMode {
    type Err = UnknownDecodeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(UnknownDecodeMode(s.to_string())),
        }
    }
}

impl fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Lenient => f.write_str("lenient"),
        }
    }
}

/// Encode the UTF-8 bytes of `text` as padded standard Base64.
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode Base64 `encoded` back into UTF-8 text.
///
/// In [`DecodeMode::Strict`] the input must be canonical padded Base64 and the
/// decoded bytes must be valid UTF-8. [`DecodeMode::Lenient`] never fails.
pub fn decode(encoded: &str, mode: DecodeMode) -> Result<String, CodecError> {
    match mode {
        DecodeMode::Strict => {
            let bytes = STANDARD.decode(encoded)?;
            Ok(String::from_utf8(bytes)?)
        }
        DecodeMode::Lenient => {
            let sextets = normalize_lenient(encoded);
            // Normalized input only holds alphabet characters in a decodable length.
            let bytes = LENIENT.decode(sextets).unwrap_or_default();
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// Reduce arbitrary text to a decodable run of standard-alphabet characters.
///
/// URL-safe `-`/`_` map to `+`/`/`, anything else outside the alphabet is
/// skipped, input ends at the first `=`, and a dangling final character
/// (which cannot carry a whole byte) is dropped.
fn normalize_lenient(encoded: &str) -> String {
    let mut sextets: String = encoded
        .chars()
        .take_while(|c| *c != '=')
        .filter_map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '+' | '/' => Some(c),
            '-' => Some('+'),
            '_' => Some('/'),
            _ => None,
        })
        .collect();

    if sextets.len() % 4 == 1 {
        sextets.pop();
    }
    sextets
}
