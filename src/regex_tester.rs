//! Regex pattern testing and replacement.
//!
//! Patterns arrive with a JavaScript-style flag string (letters from
//! `g i m s u y`). `g` selects all-matches mode, `i m s` map onto inline
//! flags, `u` is meaningless here (matching is always Unicode-aware),
//! and `y` is accepted for input compatibility but matching is never
//! sticky. Match offsets are byte indices.

use regex::Regex;
use serde::Serialize;

use crate::error::RegexError;

/// One match occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegexMatch {
    /// The full matched substring.
    pub text: String,
    /// 0-based byte offset of the match start.
    pub index: usize,
    /// Capture groups 1.., `None` where an optional group did not
    /// participate in the match.
    pub groups: Vec<Option<String>>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Flags {
    global: bool,
    ignore_case: bool,
    multi_line: bool,
    dot_all: bool,
}

fn parse_flags(flags: &str) -> Result<Flags, RegexError> {
    let mut parsed = Flags::default();
    for c in flags.chars() {
        match c {
            'g' => parsed.global = true,
            'i' => parsed.ignore_case = true,
            'm' => parsed.multi_line = true,
            's' => parsed.dot_all = true,
            'u' | 'y' => {}
            other => {
                return Err(RegexError::Compile(format!("unknown flag '{other}'")));
            }
        }
    }
    Ok(parsed)
}

fn compile(pattern: &str, flags: Flags) -> Result<Regex, RegexError> {
    let mut inline = String::new();
    if flags.ignore_case {
        inline.push('i');
    }
    if flags.multi_line {
        inline.push('m');
    }
    if flags.dot_all {
        inline.push('s');
    }
    let full = if inline.is_empty() {
        pattern.to_string()
    } else {
        format!("(?{inline}){pattern}")
    };
    Regex::new(&full).map_err(|e| RegexError::Compile(e.to_string()))
}

/// Runs `pattern` with `flags` over `text`.
///
/// With the `g` flag, returns every non-overlapping match left to right;
/// without it, at most the first.
pub fn test_regex(pattern: &str, flags: &str, text: &str) -> Result<Vec<RegexMatch>, RegexError> {
    if pattern.trim().is_empty() {
        return Err(RegexError::EmptyPattern);
    }
    let parsed = parse_flags(flags)?;
    let re = compile(pattern, parsed)?;

    let mut matches = Vec::new();
    for caps in re.captures_iter(text) {
        // Group 0 always participates.
        let Some(whole) = caps.get(0) else { continue };
        matches.push(RegexMatch {
            text: whole.as_str().to_string(),
            index: whole.start(),
            groups: (1..caps.len())
                .map(|i| caps.get(i).map(|g| g.as_str().to_string()))
                .collect(),
        });
        if !parsed.global {
            break;
        }
    }
    Ok(matches)
}

/// Substitutes matches of `pattern` in `text` with `replacement`.
///
/// The `g` flag replaces every match, otherwise only the first. The
/// replacement template supports `$1`, `$2`, … back-references, `$&` for
/// the whole match, and `$$` for a literal dollar.
pub fn replace_with_regex(
    pattern: &str,
    flags: &str,
    text: &str,
    replacement: &str,
) -> Result<String, RegexError> {
    if pattern.trim().is_empty() {
        return Err(RegexError::EmptyPattern);
    }
    let parsed = parse_flags(flags)?;
    let re = compile(pattern, parsed)?;
    let template = rewrite_template(replacement);

    let result = if parsed.global {
        re.replace_all(text, template.as_str())
    } else {
        re.replace(text, template.as_str())
    };
    Ok(result.into_owned())
}

/// Rewrites the JavaScript `$&` whole-match placeholder to this engine's
/// `${0}`, leaving `$$` escapes intact.
fn rewrite_template(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                out.push_str("$$");
                chars.next();
            }
            Some('&') => {
                out.push_str("${0}");
                chars.next();
            }
            _ => out.push('$'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(matches!(test_regex("a", "gx", "a"), Err(RegexError::Compile(_))));
    }

    #[test]
    fn unmatched_optional_group_is_none() {
        let matches = test_regex("(a)(b)?", "g", "a").unwrap();
        assert_eq!(matches[0].groups, vec![Some("a".to_string()), None]);
    }

    #[test]
    fn template_rewriting() {
        assert_eq!(rewrite_template("[$&]"), "[${0}]");
        assert_eq!(rewrite_template("$$& $1"), "$$& $1");
        assert_eq!(rewrite_template("end$"), "end$");
    }
}
