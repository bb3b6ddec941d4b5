//! Integration tests for Base64 encoding and decoding.

use devtoolbox::{
    decode_base64, encode_base64, encode_base64_bytes, wrap_base64_lines, Base64Error,
    DecodedValue,
};

#[test]
fn encodes_the_sample_text() {
    let encoded = encode_base64("Hello, DevToolbox! Encode me to Base64.", false);
    assert_eq!(encoded, "SGVsbG8sIERldlRvb2xib3ghIEVuY29kZSBtZSB0byBCYXNlNjQu");
}

#[test]
fn decodes_the_sample_text_back() {
    let decoded =
        decode_base64("SGVsbG8sIERldlRvb2xib3ghIEVuY29kZSBtZSB0byBCYXNlNjQu", false).unwrap();
    assert_eq!(
        decoded,
        DecodedValue::Text("Hello, DevToolbox! Encode me to Base64.".to_string())
    );
}

#[test]
fn round_trips_multibyte_unicode() {
    for text in ["héllo wörld", "日本語テキスト", "emoji: 🦀🚀", "mixed Ω≈ç√"] {
        for url_safe in [false, true] {
            let encoded = encode_base64(text, url_safe);
            let decoded = decode_base64(&encoded, url_safe).unwrap();
            assert_eq!(decoded, DecodedValue::Text(text.to_string()), "input: {text}");
        }
    }
}

#[test]
fn empty_input_encodes_and_decodes_to_empty() {
    assert_eq!(encode_base64("", false), "");
    assert_eq!(decode_base64("", false).unwrap(), DecodedValue::Text(String::new()));
    assert_eq!(decode_base64("  \n ", false).unwrap(), DecodedValue::Text(String::new()));
}

#[test]
fn tolerates_whitespace_and_missing_padding() {
    assert_eq!(decode_base64("aGVs bG8", false).unwrap(), DecodedValue::Text("hello".into()));
    assert_eq!(decode_base64("\taGVsbG8=\n", false).unwrap(), DecodedValue::Text("hello".into()));
}

#[test]
fn url_safe_maps_the_alphabet() {
    // 0xfb 0xef encodes to "++8=" standard, "--8" url-safe.
    let encoded = encode_base64_bytes(&[0xfb, 0xef], true);
    assert!(!encoded.contains('+') && !encoded.contains('='));
    let standard = encode_base64_bytes(&[0xfb, 0xef], false);
    assert_eq!(decode_base64(&encoded, true).unwrap(), decode_base64(&standard, false).unwrap());
}

#[test]
fn rejects_characters_outside_the_alphabet() {
    assert_eq!(decode_base64("abc!", false), Err(Base64Error::InvalidAlphabet));
    assert_eq!(decode_base64("a*b=", false), Err(Base64Error::InvalidAlphabet));
}

#[test]
fn misplaced_padding_fails_decoding() {
    assert_eq!(decode_base64("a=bc", false), Err(Base64Error::DecodeFailed));
}

#[test]
fn non_utf8_payload_falls_back_to_bytes() {
    let encoded = encode_base64_bytes(&[0xff, 0xfe, 0x00, 0x01], false);
    let decoded = decode_base64(&encoded, false).unwrap();
    assert_eq!(decoded, DecodedValue::Bytes(vec![0xff, 0xfe, 0x00, 0x01]));
    assert_eq!(decoded.as_text(), None);
    assert_eq!(decoded.as_bytes(), &[0xff, 0xfe, 0x00, 0x01]);
}

#[test]
fn byte_encoding_matches_text_encoding_for_utf8() {
    let text = "same bytes";
    assert_eq!(encode_base64(text, false), encode_base64_bytes(text.as_bytes(), false));
}

#[test]
fn wraps_at_mime_line_length() {
    let encoded = "A".repeat(100);
    let wrapped = wrap_base64_lines(&encoded, 76);
    let lines: Vec<&str> = wrapped.split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].len(), 76);
    assert_eq!(lines[1].len(), 24);
}

#[test]
fn wrap_leaves_short_input_alone() {
    assert_eq!(wrap_base64_lines("short", 76), "short");
    assert_eq!(wrap_base64_lines("whatever", 0), "whatever");
    let exact = "B".repeat(76);
    assert_eq!(wrap_base64_lines(&exact, 76), exact);
}
