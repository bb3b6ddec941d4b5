//! JSON validation, pretty-printing, and minification.
//!
//! All three operations work on the parsed value, not the literal input
//! text, so they are insensitive to the input's original whitespace.
//! Object key order is preserved as encountered.

use serde::Serialize;
use serde_json::Value;

use crate::error::JsonSyntaxError;
use crate::options::IndentStyle;

/// Parses `input` as JSON.
///
/// Empty or whitespace-only input is valid and carries no value
/// (`Ok(None)`). Syntax errors are returned as [`JsonSyntaxError`] with
/// the parser's message and, where available, a 1-based line/column.
pub fn validate_json(input: &str) -> Result<Option<Value>, JsonSyntaxError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            // serde_json reports column 0 for errors with no real position.
            let line = (err.line() > 0).then(|| err.line());
            let column = (err.column() > 0).then(|| err.column());
            Err(JsonSyntaxError::new(err.to_string(), line, column))
        }
    }
}

/// Pretty-prints `input` with the chosen indent unit.
///
/// Returns an empty string when the input is invalid or empty.
pub fn format_json(input: &str, indent: IndentStyle) -> String {
    match validate_json(input) {
        Ok(Some(value)) => serialize_with_indent(&value, indent.unit()),
        _ => String::new(),
    }
}

/// Minifies `input`, removing all insignificant whitespace.
///
/// Returns an empty string when the input is invalid or empty.
pub fn minify_json(input: &str) -> String {
    match validate_json(input) {
        Ok(Some(value)) => serde_json::to_string(&value).unwrap_or_default(),
        _ => String::new(),
    }
}

fn serialize_with_indent(value: &Value, unit: &str) -> String {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(unit.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    if value.serialize(&mut ser).is_err() {
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_position_is_one_based() {
        let err = validate_json("{\n  \"a\": ,\n}").unwrap_err();
        assert_eq!(err.line, Some(2));
        assert!(err.column.is_some());
    }

    #[test]
    fn tab_indent_uses_tabs() {
        let out = format_json("[1]", IndentStyle::Tab);
        assert_eq!(out, "[\n\t1\n]");
    }
}
