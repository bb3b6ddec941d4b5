//! Compact JWT decoding and claim inspection.
//!
//! This module splits a `header.payload.signature` token, Base64URL-
//! decodes the first two segments, and parses them as JSON objects. The
//! signature is carried through verbatim and never verified: decoded
//! claims are untrusted input, and anything derived from them here is
//! advisory display data, not an authentication decision.

use base64::alphabet;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::{DecodePaddingMode, GeneralPurpose};
use base64::Engine as _;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::JwtError;

/// JWT segments are Base64URL with padding usually omitted; accept both.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded (not verified) JWT.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JwtDecoded {
    pub header: Map<String, Value>,
    pub payload: Map<String, Value>,
    /// The third token segment, verbatim and undecoded.
    pub signature: String,
    /// Decoded JSON text of the header segment.
    pub header_raw: String,
    /// Decoded JSON text of the payload segment.
    pub payload_raw: String,
}

/// Splits and decodes a compact JWT.
///
/// Fails with [`JwtError::EmptyToken`] on blank input and
/// [`JwtError::MalformedStructure`] unless the token has exactly 3
/// non-empty dot-separated segments. Header and payload must each decode
/// to a JSON object; failures name the offending segment.
pub fn decode_jwt(token: &str) -> Result<JwtDecoded, JwtError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(JwtError::EmptyToken);
    }

    let parts: Vec<&str> = trimmed.split('.').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(JwtError::MalformedStructure);
    }

    let header_raw = decode_segment(parts[0]).map_err(JwtError::InvalidHeaderJson)?;
    let payload_raw = decode_segment(parts[1]).map_err(JwtError::InvalidPayloadJson)?;

    let header = parse_object(&header_raw).map_err(JwtError::InvalidHeaderJson)?;
    let payload = parse_object(&payload_raw).map_err(JwtError::InvalidPayloadJson)?;

    Ok(JwtDecoded {
        header,
        payload,
        signature: parts[2].to_string(),
        header_raw,
        payload_raw,
    })
}

fn decode_segment(segment: &str) -> Result<String, String> {
    let mut padded = segment.to_string();
    let rem = padded.len() % 4;
    if rem != 0 {
        padded.push_str(&"=".repeat(4 - rem));
    }
    let bytes = URL_SAFE_LENIENT
        .decode(&padded)
        .map_err(|e| format!("base64url decode error: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("utf8 error: {e}"))
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("not a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Pretty-prints a decoded header or payload for display.
pub fn jwt_part_to_json(part: &Map<String, Value>, indent: usize) -> String {
    let unit = " ".repeat(indent);
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(unit.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    if Value::Object(part.clone()).serialize(&mut ser).is_err() {
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}

/// Advisory facts derived from the registered time claims and `alg`.
///
/// Everything here is a pure function of the decoded token and the
/// supplied instant. Missing or non-numeric claims are simply absent;
/// none of these flags make the decode itself fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimSummary {
    pub alg: Option<String>,
    /// Header declares `"alg": "none"`, meaning an unsigned token.
    pub alg_none: bool,
    pub iat: Option<i64>,
    pub exp: Option<i64>,
    pub nbf: Option<i64>,
    /// `exp` is present and in the past.
    pub expired: bool,
    /// `nbf` is present and in the future.
    pub not_yet_valid: bool,
    /// No usable `exp` claim: the token never expires.
    pub missing_exp: bool,
    /// `iat` → `exp` span, e.g. `"45s"`, `"30m"`, `"2.5h"`, `"1.0 day"`.
    pub lifetime: Option<String>,
    pub exp_relative: Option<String>,
    pub nbf_relative: Option<String>,
}

/// Summarizes the time claims of `jwt` against `now_secs` (Unix seconds).
pub fn summarize_claims(jwt: &JwtDecoded, now_secs: i64) -> ClaimSummary {
    let alg = jwt.header.get("alg").and_then(Value::as_str).map(str::to_string);
    let alg_none = alg.as_deref() == Some("none");

    let iat = numeric_claim(&jwt.payload, "iat");
    let exp = numeric_claim(&jwt.payload, "exp");
    let nbf = numeric_claim(&jwt.payload, "nbf");

    let lifetime = match (iat, exp) {
        (Some(iat), Some(exp)) if exp > iat => Some(format_lifetime(iat, exp)),
        _ => None,
    };

    ClaimSummary {
        alg,
        alg_none,
        iat,
        exp,
        nbf,
        expired: exp.is_some_and(|e| e < now_secs),
        not_yet_valid: nbf.is_some_and(|n| n > now_secs),
        missing_exp: exp.is_none(),
        lifetime,
        exp_relative: exp.map(|e| time_until_or_since(e, now_secs)),
        nbf_relative: nbf.map(|n| time_until_or_since(n, now_secs)),
    }
}

fn numeric_claim(payload: &Map<String, Value>, name: &str) -> Option<i64> {
    match payload.get(name) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

/// Formats the `iat`→`exp` span as a short duration.
pub fn format_lifetime(iat: i64, exp: i64) -> String {
    let sec = exp - iat;
    if sec < 60 {
        return format!("{sec}s");
    }
    if sec < 3600 {
        return format!("{}m", div_round(sec, 60));
    }
    if sec < 86400 {
        return format!("{:.1}h", sec as f64 / 3600.0);
    }
    let days = format!("{:.1}", sec as f64 / 86400.0);
    let plural = if days == "1.0" { "" } else { "s" };
    format!("{days} day{plural}")
}

/// Phrases how far `ts` (Unix seconds) lies from `now_secs`.
pub fn time_until_or_since(ts: i64, now_secs: i64) -> String {
    let sec = ts - now_secs;
    let abs = sec.abs();
    if abs < 60 {
        return if sec >= 0 {
            "in less than a minute".to_string()
        } else {
            "less than a minute ago".to_string()
        };
    }
    if abs < 3600 {
        let m = div_round(abs, 60);
        return if sec >= 0 { format!("in {m}m") } else { format!("{m}m ago") };
    }
    if abs < 86400 {
        let h = format!("{:.1}", abs as f64 / 3600.0);
        return if sec >= 0 { format!("in {h}h") } else { format!("{h}h ago") };
    }
    let d = div_round(abs, 86400);
    let plural = if d == 1 { "" } else { "s" };
    if sec >= 0 {
        format!("in {d} day{plural}")
    } else {
        format!("{d} day{plural} ago")
    }
}

/// Round-half-up integer division for non-negative durations.
fn div_round(n: i64, unit: i64) -> i64 {
    (n + unit / 2) / unit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_buckets() {
        assert_eq!(format_lifetime(0, 45), "45s");
        assert_eq!(format_lifetime(0, 1800), "30m");
        assert_eq!(format_lifetime(0, 9000), "2.5h");
        assert_eq!(format_lifetime(0, 86400), "1.0 day");
        assert_eq!(format_lifetime(0, 3 * 86400), "3.0 days");
    }

    #[test]
    fn relative_phrasing() {
        assert_eq!(time_until_or_since(100, 90), "in less than a minute");
        assert_eq!(time_until_or_since(90, 100), "less than a minute ago");
        assert_eq!(time_until_or_since(400, 100), "in 5m");
        assert_eq!(time_until_or_since(100, 100 + 2 * 86400), "2 days ago");
    }
}
