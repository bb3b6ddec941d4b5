//! Base64 encoding and decoding, standard and URL-safe alphabets.
//!
//! Decoding accepts the kind of slightly-sloppy input people paste into
//! a tool: embedded whitespace is stripped, missing `=` padding is
//! restored, and non-canonical trailing bits are tolerated. Input with
//! characters outside the Base64 alphabet is rejected outright.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurposeConfig, STANDARD, URL_SAFE_NO_PAD};
use base64::engine::{DecodePaddingMode, GeneralPurpose};
use base64::Engine as _;
use serde::Serialize;

use crate::error::Base64Error;

/// Decode engines tolerant of non-canonical padding and trailing bits.
const LENIENT_CONFIG: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_allow_trailing_bits(true)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT_CONFIG);

/// A successfully decoded Base64 payload.
///
/// The branch taken is explicit: `Text` when the decoded bytes are valid
/// UTF-8, `Bytes` otherwise. Non-UTF-8 content is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DecodedValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl DecodedValue {
    /// The decoded text, if the payload was valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DecodedValue::Text(s) => Some(s),
            DecodedValue::Bytes(_) => None,
        }
    }

    /// The decoded payload as raw bytes, whichever branch was taken.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            DecodedValue::Text(s) => s.as_bytes(),
            DecodedValue::Bytes(b) => b,
        }
    }
}

/// Encodes `text` as Base64 (UTF-8 bytes of the input).
///
/// The standard alphabet is padded; the URL-safe alphabet (`-`/`_`) is
/// emitted without padding, as JWT segments are. Empty input encodes to
/// an empty string.
pub fn encode_base64(text: &str, url_safe: bool) -> String {
    encode_base64_bytes(text.as_bytes(), url_safe)
}

/// Encodes a raw byte sequence without any text interpretation.
pub fn encode_base64_bytes(bytes: &[u8], url_safe: bool) -> String {
    if url_safe {
        URL_SAFE_NO_PAD.encode(bytes)
    } else {
        STANDARD.encode(bytes)
    }
}

/// Decodes Base64 `encoded` text.
///
/// All whitespace is stripped first. With `url_safe`, `-` and `_` are
/// mapped to `+` and `/` before processing, so both alphabets decode.
/// Padding is restored to a multiple of 4. Empty (or whitespace-only)
/// input decodes to empty text.
pub fn decode_base64(encoded: &str, url_safe: bool) -> Result<DecodedValue, Base64Error> {
    let mut compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(DecodedValue::Text(String::new()));
    }

    if url_safe {
        compact = compact.replace('-', "+").replace('_', "/");
    }
    let rem = compact.len() % 4;
    if rem != 0 {
        compact.push_str(&"=".repeat(4 - rem));
    }

    if !compact.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')) {
        return Err(Base64Error::InvalidAlphabet);
    }

    let bytes = STANDARD_LENIENT.decode(&compact).map_err(|_| Base64Error::DecodeFailed)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => DecodedValue::Text(text),
        Err(err) => DecodedValue::Bytes(err.into_bytes()),
    })
}

/// Inserts a line break every `line_length` characters, MIME-style.
///
/// Returns the input unchanged when it already fits on one line or when
/// `line_length` is zero.
pub fn wrap_base64_lines(base64: &str, line_length: usize) -> String {
    if line_length < 1 || base64.len() <= line_length {
        return base64.to_string();
    }
    base64
        .as_bytes()
        .chunks(line_length)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_and_strips_whitespace() {
        let decoded = decode_base64("  aGVs\n bG8 ", false).unwrap();
        assert_eq!(decoded, DecodedValue::Text("hello".into()));
    }

    #[test]
    fn url_safe_round_trip_has_no_padding() {
        let encoded = encode_base64("hi?", true);
        assert!(!encoded.contains('='));
        assert_eq!(decode_base64(&encoded, true).unwrap(), DecodedValue::Text("hi?".into()));
    }

    #[test]
    fn wrap_is_noop_for_short_input() {
        assert_eq!(wrap_base64_lines("abcd", 76), "abcd");
        assert_eq!(wrap_base64_lines("abcd", 0), "abcd");
    }
}
