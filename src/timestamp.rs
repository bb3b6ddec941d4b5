//! Unix-timestamp and date-string conversion.
//!
//! Numeric input is an epoch whose unit (seconds, milliseconds,
//! microseconds, nanoseconds) is inferred from its significant-digit
//! count. Anything else goes through a date-string parsing chain.
//! Either way the result is a canonical signed millisecond instant from
//! which every display field is derived.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::TimestampError;

const SEC_MS: i64 = 1000;
const MIN_MS: i64 = 60 * SEC_MS;
const HOUR_MS: i64 = 60 * MIN_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const YEAR_MS: f64 = 365.25 * DAY_MS as f64;

/// The furthest instant representable as a calendar date, in ms from the
/// epoch (±100,000,000 days).
const MAX_ABS_MS: f64 = 8.64e15;

/// A parsed instant with its rendered display forms.
///
/// `timestamp_ms` is the single source of truth; every other field is a
/// derivation of it. `relative` additionally depends on the wall clock
/// at parse time, and the two `*_string` locale fields on the caller's
/// local timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    /// Milliseconds since the Unix epoch; negative before 1970.
    pub timestamp_ms: i64,
    /// Medium date + time in the local timezone, e.g. `Feb 8, 2024, 12:00:00 AM`.
    pub local_string: String,
    /// `Thu, 08 Feb 2024 00:00:00 GMT`.
    pub utc_string: String,
    /// ISO 8601 with milliseconds, e.g. `2024-02-08T00:00:00.000Z`.
    pub iso: String,
    /// RFC 2822 in local time with a numeric offset, e.g.
    /// `Thu, 08 Feb 2024 01:00:00 +0100`.
    pub rfc2822: String,
    /// Whole seconds, floored.
    pub unix_seconds: i64,
    pub unix_ms: i64,
    /// Coarse distance from now, e.g. `2 hours ago` or `in 3 days`.
    pub relative: String,
    /// Weekday name, e.g. `Thursday`.
    pub weekday: String,
    /// 1-based day of the year.
    pub day_of_year: u32,
    /// Week of the year counted from January 1, weeks starting Monday.
    pub week_number: u32,
}

/// Parses a Unix epoch (unit auto-detected) or a date string.
pub fn parse_timestamp(input: &str) -> Result<Timestamp, TimestampError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(TimestampError::EmptyInput);
    }

    if let Some(num) = parse_numeric(raw) {
        let ms = match significant_digits(raw) {
            0..=10 => num * SEC_MS as f64,
            11..=13 => num,
            14..=16 => num / 1e3,
            _ => num / 1e6,
        };
        if !ms.is_finite() || ms.abs() > MAX_ABS_MS {
            return Err(TimestampError::OutOfRange);
        }
        return build_result(ms.round() as i64);
    }

    let ms = parse_date_string(raw).ok_or(TimestampError::UnparseableDate)?;
    build_result(ms)
}

/// Derives every display field from a canonical millisecond instant.
///
/// Fails with [`TimestampError::OutOfRange`] when the instant falls
/// outside the representable calendar range.
pub fn build_result(timestamp_ms: i64) -> Result<Timestamp, TimestampError> {
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .ok_or(TimestampError::OutOfRange)?;
    let local = utc.with_timezone(&Local);

    let jan1 = NaiveDate::from_ymd_opt(utc.year(), 1, 1).ok_or(TimestampError::OutOfRange)?;
    let week_number = (utc.ordinal0() + jan1.weekday().num_days_from_monday()) / 7 + 1;

    Ok(Timestamp {
        timestamp_ms,
        local_string: local.format("%b %-d, %Y, %-I:%M:%S %p").to_string(),
        utc_string: utc.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        iso: utc.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        rfc2822: local.format("%a, %d %b %Y %H:%M:%S %z").to_string(),
        unix_seconds: timestamp_ms.div_euclid(SEC_MS),
        unix_ms: timestamp_ms,
        relative: format_relative(timestamp_ms, now_unix_ms()),
        weekday: utc.format("%A").to_string(),
        day_of_year: utc.ordinal(),
        week_number,
    })
}

/// Phrases the distance between an instant and `now_ms`.
///
/// Buckets by magnitude into seconds, minutes, hours, days, and
/// 365.25-day years; future instants read `in …`, past ones `… ago`, and
/// anything under a second is `just now` / `right now`.
pub fn format_relative(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = timestamp_ms.saturating_sub(now_ms);
    let abs = diff.saturating_abs();
    if abs < SEC_MS {
        return if diff < 0 { "just now" } else { "right now" }.to_string();
    }

    let (prefix, suffix) = if diff >= 0 { ("in ", "") } else { ("", " ago") };
    let bucket = |unit_ms: f64, name: &str| {
        let n = (abs as f64 / unit_ms).round() as i64;
        let plural = if abs as f64 >= 2.0 * unit_ms { "s" } else { "" };
        format!("{prefix}{n} {name}{plural}{suffix}")
    };

    if abs < MIN_MS {
        bucket(SEC_MS as f64, "second")
    } else if abs < HOUR_MS {
        bucket(MIN_MS as f64, "minute")
    } else if abs < DAY_MS {
        bucket(HOUR_MS as f64, "hour")
    } else if (abs as f64) < YEAR_MS {
        bucket(DAY_MS as f64, "day")
    } else {
        bucket(YEAR_MS, "year")
    }
}

/// Current wall-clock time as Unix seconds.
pub fn now_unix_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Current wall-clock time as Unix milliseconds.
pub fn now_unix_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Shifts an instant by `delta_ms`, saturating at the integer bounds.
pub fn add_subtract_ms(timestamp_ms: i64, delta_ms: i64) -> i64 {
    timestamp_ms.saturating_add(delta_ms)
}

/// A ready-to-paste constructor expression for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSnippet {
    pub language: &'static str,
    pub code: String,
}

/// Per-language snippets constructing the given instant.
pub fn code_snippets(unix_seconds: i64, unix_ms: i64) -> Vec<CodeSnippet> {
    vec![
        CodeSnippet { language: "JavaScript", code: format!("new Date({unix_ms})") },
        CodeSnippet {
            language: "Python",
            code: format!("datetime.fromtimestamp({unix_seconds}, tz=timezone.utc)"),
        },
        CodeSnippet {
            language: "Rust",
            code: format!("DateTime::from_timestamp({unix_seconds}, 0)"),
        },
        CodeSnippet { language: "Go", code: format!("time.Unix({unix_seconds}, 0)") },
        CodeSnippet { language: "Java", code: format!("Instant.ofEpochMilli({unix_ms}L)") },
        CodeSnippet { language: "PHP", code: format!("date('c', {unix_seconds})") },
        CodeSnippet { language: "Ruby", code: format!("Time.at({unix_seconds})") },
        CodeSnippet { language: "SQL", code: format!("to_timestamp({unix_seconds})") },
    ]
}

/// Accepts optionally signed decimals with an optional exponent.
fn parse_numeric(raw: &str) -> Option<f64> {
    let rest = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };

    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in mantissa.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return None,
        }
    }
    if !seen_digit {
        return None;
    }
    if let Some(exp) = exponent {
        let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Counts significant digits: signs, the decimal point, exponent
/// suffixes, and leading zeros are ignored. Minimum 1.
fn significant_digits(raw: &str) -> usize {
    let unsigned = raw.trim_start_matches(['+', '-']);
    let mantissa = match unsigned.find(['e', 'E']) {
        Some(pos) => &unsigned[..pos],
        None => unsigned,
    };
    let count = mantissa
        .chars()
        .filter(char::is_ascii_digit)
        .skip_while(|c| *c == '0')
        .count();
    count.max(1)
}

/// Date-string fallback chain: RFC 3339, RFC 2822, then common formats.
/// Date-times without an offset are taken as UTC.
fn parse_date_string(raw: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc).timestamp_millis());
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ndt.and_utc().timestamp_millis());
        }
    }

    const DATE_FORMATS: &[&str] =
        &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%b %d, %Y", "%B %d, %Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            let ndt = date.and_hms_opt(0, 0, 0)?;
            return Some(ndt.and_utc().timestamp_millis());
        }
    }
    None
}
