use serde::Serialize;
use thiserror::Error;

/// A JSON syntax error with an optional source location.
///
/// `line` and `column` are 1-based and best-effort: they are filled in
/// when the underlying parser reports a usable position and omitted
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct JsonSyntaxError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl JsonSyntaxError {
    pub fn new(message: impl Into<String>, line: Option<usize>, column: Option<usize>) -> Self {
        Self { message: message.into(), line, column }
    }
}

/// Errors from Base64 decoding. Encoding cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
pub enum Base64Error {
    /// The input contains characters outside the Base64 alphabet
    /// (checked after whitespace stripping and URL-safe normalization).
    #[error("invalid Base64: contains invalid characters")]
    InvalidAlphabet,
    /// The character-level input looked fine but the binary decode failed,
    /// e.g. padding in an illegal position.
    #[error("invalid Base64: decoding failed")]
    DecodeFailed,
}

/// Errors from decoding a compact JWT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum JwtError {
    #[error("empty token")]
    EmptyToken,
    /// The token does not split into exactly 3 non-empty dot-separated parts.
    #[error("invalid JWT format: expected 3 parts separated by dots")]
    MalformedStructure,
    /// The header segment failed to Base64URL-decode or is not a JSON object.
    #[error("invalid JWT header: {0}")]
    InvalidHeaderJson(String),
    /// The payload segment failed to Base64URL-decode or is not a JSON object.
    #[error("invalid JWT payload: {0}")]
    InvalidPayloadJson(String),
}

/// Errors from the regex tester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum RegexError {
    #[error("pattern is empty")]
    EmptyPattern,
    /// Pattern or flags failed to compile; carries the engine's message.
    #[error("{0}")]
    Compile(String),
}

/// Errors from timestamp parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
pub enum TimestampError {
    #[error("enter a timestamp or date")]
    EmptyInput,
    #[error("timestamp out of valid date range")]
    OutOfRange,
    #[error("could not parse as timestamp or date")]
    UnparseableDate,
}
