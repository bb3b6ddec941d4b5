//! Integration tests for the .env engine: parsing, validation, and the
//! four output shapes.

use devtoolbox::{
    format_env, parse_env, parse_json_to_env, to_env_example, to_json, validate_env,
    EnvSpacing, FormatEnvOptions, LineEnding, LineKind,
};

const SAMPLE: &str = "# App config\nNODE_ENV=development\n\nDATABASE_URL=postgres://localhost/mydb\nDATABASE_URL=postgres://other\nAPI_KEY=sk-1234567890\n";

#[test]
fn classifies_every_line() {
    let parsed = parse_env(SAMPLE);
    assert_eq!(parsed.entries.len(), 4);
    assert_eq!(parsed.comments.len(), 1);
    // The blank separator line plus the one produced by the trailing newline.
    assert_eq!(parsed.blanks, vec![2, 6]);
    assert_eq!(parsed.line_order.len(), 7);
    assert_eq!(parsed.line_order[0].kind, LineKind::Comment);
    assert_eq!(parsed.line_order[1].kind, LineKind::Entry);
}

#[test]
fn duplicate_keys_are_advisory() {
    let parsed = parse_env("A=1\nA=2\n");
    assert_eq!(parsed.entries.len(), 2);
    assert_eq!(parsed.entries[0].key, "A");
    assert_eq!(parsed.entries[1].key, "A");

    let validation = validate_env(&parsed);
    assert!(validation.valid);
    assert!(validation.errors.is_empty());
    assert_eq!(validation.duplicate_keys, vec!["A".to_string()]);
}

#[test]
fn last_value_wins_in_json() {
    let parsed = parse_env("A=1\nA=2\n");
    assert_eq!(to_json(&parsed, 0), r#"{"A":"2"}"#);
}

#[test]
fn invalid_keys_are_flagged_with_line_numbers() {
    let parsed = parse_env("GOOD=1\n1BAD=x\n=empty\n");
    let validation = validate_env(&parsed);
    assert!(!validation.valid);
    assert_eq!(validation.errors.len(), 2);
    assert!(validation.errors[0].contains("Line 2"));
    assert!(validation.errors[0].contains("1BAD"));
    assert!(validation.errors[1].contains("Line 3"));
    assert!(validation.errors[1].contains("empty key"));
}

#[test]
fn format_round_trips_structure() {
    // The input's trailing newline parses as a final blank line, so the
    // round-trip is exact without the extra trailing terminator.
    let options = FormatEnvOptions { trailing_newline: false, ..Default::default() };
    let out = format_env(&parse_env(SAMPLE), &options);
    assert_eq!(out, SAMPLE);
}

#[test]
fn sorting_keeps_comments_in_place() {
    let input = "# first\nB=2\nA=1";
    let options = FormatEnvOptions { sort_keys: true, ..Default::default() };
    let out = format_env(&parse_env(input), &options);
    assert_eq!(out, "# first\nA=1\nB=2\n");
}

#[test]
fn sorting_is_case_insensitive() {
    let options = FormatEnvOptions { sort_keys: true, ..Default::default() };
    let out = format_env(&parse_env("b=1\nA=2\nC=3"), &options);
    assert_eq!(out, "A=2\nb=1\nC=3\n");
}

#[test]
fn spacing_export_and_crlf() {
    let options = FormatEnvOptions {
        spacing: EnvSpacing::Around,
        export_prefix: true,
        line_ending: LineEnding::Crlf,
        trailing_newline: false,
        ..Default::default()
    };
    let out = format_env(&parse_env("A=1\nB=2"), &options);
    assert_eq!(out, "export A = 1\r\nexport B = 2");
}

#[test]
fn minify_drops_comments_and_blanks() {
    let options = FormatEnvOptions { minify: true, ..Default::default() };
    let out = format_env(&parse_env(SAMPLE), &options);
    assert_eq!(
        out,
        "NODE_ENV=development\nDATABASE_URL=postgres://localhost/mydb\nDATABASE_URL=postgres://other\nAPI_KEY=sk-1234567890\n"
    );
}

#[test]
fn values_are_requoted_only_when_needed() {
    let parsed = parse_env("A=\"two words\"\nB=plain\nC=\"a=b\"");
    assert_eq!(parsed.entries[0].value, "two words");
    let out =
        format_env(&parsed, &FormatEnvOptions { trailing_newline: false, ..Default::default() });
    assert_eq!(out, "A=\"two words\"\nB=plain\nC=\"a=b\"");
}

#[test]
fn escape_handles_control_characters() {
    let parsed = parse_env("A=\"line1\\nline2\"");
    assert_eq!(parsed.entries[0].value, "line1\nline2");
    let out =
        format_env(&parsed, &FormatEnvOptions { trailing_newline: false, ..Default::default() });
    assert_eq!(out, "A=\"line1\\nline2\"");
}

#[test]
fn inline_comments_terminate_unquoted_values() {
    let parsed = parse_env("A=value # explanation\n");
    assert_eq!(parsed.entries[0].value, "value");
}

#[test]
fn single_quotes_suppress_escapes() {
    let parsed = parse_env("A='raw \\n text'\n");
    assert_eq!(parsed.entries[0].value, "raw \\n text");
}

#[test]
fn example_output_masks_values() {
    let parsed = parse_env("# keys\nA=secret\nB=other\n");
    assert_eq!(
        to_env_example(&parsed, "", LineEnding::Lf),
        "# keys\nA=\"\"\nB=\"\"\n\n"
    );
    assert_eq!(
        to_env_example(&parsed, "<value>", LineEnding::Lf),
        "# keys\nA=<value>\nB=<value>\n\n"
    );
}

#[test]
fn json_output_is_indented() {
    let parsed = parse_env("A=1\nB=2\n");
    assert_eq!(to_json(&parsed, 2), "{\n  \"A\": \"1\",\n  \"B\": \"2\"\n}");
}

#[test]
fn json_objects_become_synthetic_entries() {
    let parsed = parse_json_to_env(r#"{"A":"1","PORT":8080,"FLAG":true}"#).unwrap();
    assert_eq!(parsed.entries.len(), 3);
    assert_eq!(parsed.entries[0].key, "A");
    assert_eq!(parsed.entries[0].value, "1");
    assert_eq!(parsed.entries[1].value, "8080");
    assert_eq!(parsed.entries[2].value, "true");
    assert!(parsed.comments.is_empty());
    assert!(parsed.blanks.is_empty());
}

#[test]
fn non_objects_fall_back_to_none() {
    assert!(parse_json_to_env("[1,2,3]").is_none());
    assert!(parse_json_to_env("\"text\"").is_none());
    assert!(parse_json_to_env("null").is_none());
    assert!(parse_json_to_env("not json at all").is_none());
}
