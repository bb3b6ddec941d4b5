//! `.env` file parsing, validation, and re-rendering.
//!
//! The parser classifies every line as exactly one of blank, comment, or
//! entry, and keeps enough structure to reproduce the original line
//! order. Nothing is ever dropped: a non-blank line that is not a
//! `KEY=value` entry is preserved as a comment-like line, which is looser
//! than strict dotenv parsers on purpose.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::options::{EnvSpacing, FormatEnvOptions, LineEnding};

/// A well-formed environment variable name.
fn key_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("literal pattern"))
}

/// Anything `KEY=`-shaped, including malformed keys such as `1BAD` or an
/// empty key, so validation can report them by line number. Lines whose
/// key-side contains whitespace fall through to the comment bucket.
fn entry_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(export\s+)?([^\s=#]*)\s*=\s*(.*)$").expect("literal pattern"))
}

fn inline_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s#\s").expect("literal pattern"))
}

/// One `KEY=value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
    /// The text left of `=` as written, `export` prefix included.
    pub raw_key: String,
    pub line_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvComment {
    pub text: String,
    pub line_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Entry,
    Comment,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRef {
    pub line_index: usize,
    pub kind: LineKind,
}

/// A parsed `.env` document.
///
/// `line_order` reconstructs the input line sequence exactly; `entries`,
/// `comments`, and `blanks` are partitions of it addressable by
/// `line_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEnv {
    pub entries: Vec<EnvEntry>,
    pub comments: Vec<EnvComment>,
    pub blanks: Vec<usize>,
    pub line_order: Vec<LineRef>,
}

/// Validation outcome: hard errors plus the advisory duplicate-key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvValidation {
    pub valid: bool,
    /// One message per offending line, 1-based line numbers.
    pub errors: Vec<String>,
    /// Keys appearing on two or more entry lines. Advisory: the
    /// documented policy is that the last value wins.
    pub duplicate_keys: Vec<String>,
}

/// Parses `.env`-style text.
pub fn parse_env(input: &str) -> ParsedEnv {
    let mut entries = Vec::new();
    let mut comments = Vec::new();
    let mut blanks = Vec::new();
    let mut line_order = Vec::new();

    for (line_index, raw_line) in input.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            blanks.push(line_index);
            line_order.push(LineRef { line_index, kind: LineKind::Blank });
            continue;
        }

        if trimmed.starts_with('#') {
            comments.push(EnvComment { text: trimmed.to_string(), line_index });
            line_order.push(LineRef { line_index, kind: LineKind::Comment });
            continue;
        }

        if let Some(caps) = entry_line_re().captures(trimmed) {
            let key = caps.get(2).map_or("", |m| m.as_str()).to_string();
            let value_part = caps.get(3).map_or("", |m| m.as_str());
            let eq = trimmed.find('=').unwrap_or(trimmed.len());
            entries.push(EnvEntry {
                key,
                value: parse_value(value_part),
                raw_key: trimmed[..eq].trim_end().to_string(),
                line_index,
            });
            line_order.push(LineRef { line_index, kind: LineKind::Entry });
        } else {
            // Not KEY=value shaped; keep it rather than dropping it.
            comments.push(EnvComment { text: trimmed.to_string(), line_index });
            line_order.push(LineRef { line_index, kind: LineKind::Comment });
        }
    }

    ParsedEnv { entries, comments, blanks, line_order }
}

/// Double-quoted values process backslash escapes; single-quoted values
/// are verbatim; unquoted values are trimmed and stop at an ` # ` inline
/// comment. An unterminated quote runs to the end of the line.
fn parse_value(raw: &str) -> String {
    let s = raw.trim_start();

    if let Some(rest) = s.strip_prefix('"') {
        let mut value = String::new();
        let mut chars = rest.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    Some(other) => value.push(other),
                    None => value.push('\\'),
                }
            } else if c == '"' {
                break;
            } else {
                value.push(c);
            }
        }
        return value;
    }

    if let Some(rest) = s.strip_prefix('\'') {
        return match rest.find('\'') {
            Some(end) => rest[..end].to_string(),
            None => rest.to_string(),
        };
    }

    match inline_comment_re().find(s) {
        Some(m) => s[..m.start()].trim_end().to_string(),
        None => s.trim_end().to_string(),
    }
}

/// Checks key syntax and collects duplicate keys.
///
/// Duplicate keys do not fail the document; they are reported so callers
/// can surface a warning.
pub fn validate_env(parsed: &ParsedEnv) -> EnvValidation {
    let mut errors = Vec::new();
    for entry in &parsed.entries {
        let line = entry.line_index + 1;
        if entry.key.is_empty() {
            errors.push(format!("Line {line}: empty key"));
        } else if !key_name_re().is_match(&entry.key) {
            errors.push(format!(
                "Line {line}: invalid key \"{}\" (use letters, numbers, underscores)",
                entry.key
            ));
        }
    }

    let mut seen = std::collections::HashSet::new();
    let mut duplicate_keys = Vec::new();
    for entry in &parsed.entries {
        if !seen.insert(entry.key.clone()) && !duplicate_keys.contains(&entry.key) {
            duplicate_keys.push(entry.key.clone());
        }
    }

    EnvValidation { valid: errors.is_empty(), errors, duplicate_keys }
}

/// Renders a parsed document back to `.env` text.
///
/// Non-minified output preserves the original line order. With
/// `sort_keys`, comments and blanks keep their positions while entry
/// slots are filled in case-insensitive alphabetical order, which can
/// leave a comment above a different entry than it was written for.
/// This is the documented behavior, not corrected here.
pub fn format_env(parsed: &ParsedEnv, options: &FormatEnvOptions) -> String {
    let eol = options.line_ending.as_str();
    let prefix = if options.export_prefix { "export " } else { "" };

    let mut ordered: Vec<&EnvEntry> = parsed.entries.iter().collect();
    if options.sort_keys {
        ordered.sort_by_key(|e| e.key.to_lowercase());
    }

    let body = if options.minify {
        ordered
            .iter()
            .map(|e| format!("{prefix}{}={}", e.key, escape_value(&e.value)))
            .collect::<Vec<_>>()
            .join(eol)
    } else {
        let sep = match options.spacing {
            EnvSpacing::Around => " = ",
            EnvSpacing::None => "=",
        };
        let comment_at: HashMap<usize, &EnvComment> =
            parsed.comments.iter().map(|c| (c.line_index, c)).collect();
        let entry_at: HashMap<usize, &EnvEntry> =
            parsed.entries.iter().map(|e| (e.line_index, e)).collect();

        let mut next_sorted = 0usize;
        let mut lines = Vec::with_capacity(parsed.line_order.len());
        for line_ref in &parsed.line_order {
            match line_ref.kind {
                LineKind::Blank => lines.push(String::new()),
                LineKind::Comment => {
                    if let Some(c) = comment_at.get(&line_ref.line_index) {
                        lines.push(c.text.clone());
                    }
                }
                LineKind::Entry => {
                    let entry = if options.sort_keys {
                        let e = ordered.get(next_sorted).copied();
                        next_sorted += 1;
                        e
                    } else {
                        entry_at.get(&line_ref.line_index).copied()
                    };
                    if let Some(e) = entry {
                        lines.push(format!("{prefix}{}{sep}{}", e.key, escape_value(&e.value)));
                    }
                }
            }
        }
        lines.join(eol)
    };

    if options.trailing_newline {
        format!("{body}{eol}")
    } else {
        body
    }
}

/// Renders a secrets-safe `.env.example`: same skeleton, every value
/// replaced with `placeholder` (quoted if needed) or `""`.
pub fn to_env_example(parsed: &ParsedEnv, placeholder: &str, line_ending: LineEnding) -> String {
    let eol = line_ending.as_str();
    let comment_at: HashMap<usize, &EnvComment> =
        parsed.comments.iter().map(|c| (c.line_index, c)).collect();
    let entry_at: HashMap<usize, &EnvEntry> =
        parsed.entries.iter().map(|e| (e.line_index, e)).collect();

    let value = if placeholder.is_empty() {
        "\"\"".to_string()
    } else {
        escape_value(placeholder)
    };

    let mut lines = Vec::with_capacity(parsed.line_order.len());
    for line_ref in &parsed.line_order {
        match line_ref.kind {
            LineKind::Blank => lines.push(String::new()),
            LineKind::Comment => {
                if let Some(c) = comment_at.get(&line_ref.line_index) {
                    lines.push(c.text.clone());
                }
            }
            LineKind::Entry => {
                if let Some(e) = entry_at.get(&line_ref.line_index) {
                    lines.push(format!("{}={value}", e.key));
                }
            }
        }
    }
    format!("{}{eol}", lines.join(eol))
}

/// Flattens entries into a JSON object, last value winning on duplicate
/// keys, and serializes it with `indent` spaces (0 for compact).
pub fn to_json(parsed: &ParsedEnv, indent: usize) -> String {
    let mut map = Map::new();
    for entry in &parsed.entries {
        map.insert(entry.key.clone(), Value::String(entry.value.clone()));
    }
    let value = Value::Object(map);
    if indent == 0 {
        return serde_json::to_string(&value).unwrap_or_default();
    }
    let unit = " ".repeat(indent);
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(unit.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    if value.serialize(&mut ser).is_err() {
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}

/// Accepts a flat JSON object as an alternate source format.
///
/// Each property becomes a synthetic entry (no comments or blanks).
/// Returns `None` when the input is not a JSON object, so callers can
/// fall back to plain `.env` parsing.
pub fn parse_json_to_env(input: &str) -> Option<ParsedEnv> {
    let map = match serde_json::from_str::<Value>(input.trim()) {
        Ok(Value::Object(map)) => map,
        _ => return None,
    };

    let mut entries = Vec::with_capacity(map.len());
    let mut line_order = Vec::with_capacity(map.len());
    for (line_index, (key, value)) in map.into_iter().enumerate() {
        let value = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        entries.push(EnvEntry { key: key.clone(), value, raw_key: key, line_index });
        line_order.push(LineRef { line_index, kind: LineKind::Entry });
    }

    Some(ParsedEnv { entries, comments: Vec::new(), blanks: Vec::new(), line_order })
}

/// Quotes a value only when it needs it: whitespace, `#`, `=`, quotes,
/// or backslashes force double quotes with escaping.
fn escape_value(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '#' | '=' | '"' | '\'' | '\\'));
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    format!("\"{escaped}\"")
}
