//! Integration tests for the regex tester.

use devtoolbox::{replace_with_regex, test_regex, RegexError};

#[test]
fn global_flag_finds_every_match() {
    let matches = test_regex(r"\w+@\w+\.\w+", "g", "a@b.com x@y.org").unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].text, "a@b.com");
    assert_eq!(matches[0].index, 0);
    assert_eq!(matches[1].text, "x@y.org");
    assert_eq!(matches[1].index, 8);
}

#[test]
fn without_global_only_the_first_match() {
    let matches = test_regex(r"\d+", "", "1 22 333").unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text, "1");
}

#[test]
fn no_match_is_an_empty_list() {
    assert!(test_regex("zzz", "g", "abc").unwrap().is_empty());
}

#[test]
fn capture_groups_are_ordered() {
    let matches = test_regex(r"(\w+)@(\w+)", "g", "user@host").unwrap();
    assert_eq!(
        matches[0].groups,
        vec![Some("user".to_string()), Some("host".to_string())]
    );
}

#[test]
fn unclosed_group_fails_to_compile() {
    assert!(matches!(test_regex("(", "", "x"), Err(RegexError::Compile(_))));
}

#[test]
fn blank_pattern_is_rejected() {
    assert_eq!(test_regex("", "g", "x"), Err(RegexError::EmptyPattern));
    assert_eq!(test_regex("  ", "g", "x"), Err(RegexError::EmptyPattern));
    assert_eq!(
        replace_with_regex("", "", "x", "y"),
        Err(RegexError::EmptyPattern)
    );
}

#[test]
fn case_insensitive_and_multiline_flags() {
    let matches = test_regex("^ab", "gim", "AB\nab\nAb").unwrap();
    assert_eq!(matches.len(), 3);
}

#[test]
fn dot_all_flag_crosses_lines() {
    assert_eq!(test_regex("a.b", "s", "a\nb").unwrap().len(), 1);
    assert!(test_regex("a.b", "", "a\nb").unwrap().is_empty());
}

#[test]
fn replace_first_vs_all() {
    assert_eq!(replace_with_regex(r"\d+", "", "1 2 3", "n").unwrap(), "n 2 3");
    assert_eq!(replace_with_regex(r"\d+", "g", "1 2 3", "n").unwrap(), "n n n");
}

#[test]
fn replacement_back_references() {
    let out = replace_with_regex(r"(\w+)@(\w+)", "g", "user@host", "$2@$1").unwrap();
    assert_eq!(out, "host@user");
}

#[test]
fn whole_match_placeholder() {
    let out = replace_with_regex(r"\d+", "g", "a 12 b", "<$&>").unwrap();
    assert_eq!(out, "a <12> b");
}

#[test]
fn literal_dollar_escape() {
    let out = replace_with_regex("x", "", "x", "$$5").unwrap();
    assert_eq!(out, "$5");
}
