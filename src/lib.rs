//! # DevToolbox
//!
//! A collection of independent, purely functional text and data
//! transformation engines, the kind a developer-tools frontend calls
//! into with user-supplied strings:
//!
//! - **JSON**: validate, pretty-print, and minify JSON text
//! - **Base64**: encode/decode text or raw bytes, standard and URL-safe
//!   alphabets, MIME line wrapping
//! - **JWT**: split and decode a compact token (no signature
//!   verification) and inspect its time claims
//! - **Regex**: run a pattern over text, list matches, or substitute
//! - **Timestamp**: parse epochs or date strings into a canonical
//!   instant and render it every useful way
//! - **.env**: parse, validate, and re-render `KEY=value` files while
//!   preserving comments, blank lines, and order
//!
//! Every engine is a stateless function from input to a new result
//! value: no shared state, no I/O, no panics on adversarial input.
//! Fallible operations return typed errors; advisory findings (duplicate
//! `.env` keys, expired JWT claims) ride alongside successful results.
//!
//! ## Command-Line Tool
//!
//! The `dtb` binary exposes each engine as a subcommand:
//!
//! ```sh
//! echo '{"b":1,"a":2}' | dtb json
//! echo '{"b":1,"a":2}' | dtb json --compact
//! dtb base64 encode 'Hello, world!'
//! dtb jwt decode "$TOKEN"
//! dtb timestamp 1707350400
//! dtb env --sort < .env
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use devtoolbox::{format_json, IndentStyle};
//!
//! let pretty = format_json(r#"{"name":"Alice","active":true}"#, IndentStyle::Two);
//! assert!(pretty.contains("\"name\": \"Alice\""));
//! ```
//!
//! Decoding is just as direct:
//!
//! ```rust
//! use devtoolbox::{decode_base64, DecodedValue};
//!
//! let decoded = decode_base64("aGVsbG8=", false).unwrap();
//! assert_eq!(decoded, DecodedValue::Text("hello".into()));
//! ```

mod b64;
mod env_file;
mod error;
mod json;
mod jwt;
mod options;
mod regex_tester;
mod timestamp;

pub use crate::b64::{
    decode_base64, encode_base64, encode_base64_bytes, wrap_base64_lines, DecodedValue,
};
pub use crate::env_file::{
    format_env, parse_env, parse_json_to_env, to_env_example, to_json, validate_env, EnvComment,
    EnvEntry, EnvValidation, LineKind, LineRef, ParsedEnv,
};
pub use crate::error::{Base64Error, JsonSyntaxError, JwtError, RegexError, TimestampError};
pub use crate::json::{format_json, minify_json, validate_json};
pub use crate::jwt::{
    decode_jwt, format_lifetime, jwt_part_to_json, summarize_claims, time_until_or_since,
    ClaimSummary, JwtDecoded,
};
pub use crate::options::{EnvSpacing, FormatEnvOptions, IndentStyle, LineEnding};
pub use crate::regex_tester::{replace_with_regex, test_regex, RegexMatch};
pub use crate::timestamp::{
    add_subtract_ms, build_result, code_snippets, format_relative, now_unix_ms, now_unix_seconds,
    parse_timestamp, CodeSnippet, Timestamp,
};
