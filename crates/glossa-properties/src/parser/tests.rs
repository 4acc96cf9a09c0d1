//! Unit tests for the `.properties` parser.

use rstest::rstest;

use super::*;

fn entries(source: &str) -> HashMap<String, String> {
    parse(source).unwrap_or_else(|error| panic!("parse failed for {source:?}: {error}"))
}

fn single(source: &str) -> (String, String) {
    let parsed = entries(source);
    assert_eq!(parsed.len(), 1, "expected one entry in {parsed:?}");
    parsed.into_iter().next().expect("one entry")
}

#[rstest]
#[case::equals("key=value", "key", "value")]
#[case::colon("key:value", "key", "value")]
#[case::space("key value", "key", "value")]
#[case::padded_equals("key = value", "key", "value")]
#[case::padded_colon("key  :  value", "key", "value")]
#[case::tab("key\tvalue", "key", "value")]
#[case::leading_blanks("   key=value", "key", "value")]
#[case::trailing_blanks_kept("key=value  ", "key", "value  ")]
#[case::second_separator_kept("key==value", "key", "=value")]
#[case::colon_in_value("url=http://example.com", "url", "http://example.com")]
#[case::no_value("key", "key", "")]
#[case::empty_value("key=", "key", "")]
#[case::printf_template("com.sample.formattedmessage=Hello %s!!!", "com.sample.formattedmessage", "Hello %s!!!")]
fn splits_key_and_value(#[case] source: &str, #[case] key: &str, #[case] value: &str) {
    assert_eq!(single(source), (key.to_owned(), value.to_owned()));
}

#[rstest]
#[case::tab(r"k=a\tb", "a\tb")]
#[case::newline(r"k=a\nb", "a\nb")]
#[case::carriage_return(r"k=a\rb", "a\rb")]
#[case::form_feed(r"k=a\fb", "a\u{c}b")]
#[case::backslash(r"k=a\\b", r"a\b")]
#[case::unknown_escape(r"k=\q", "q")]
#[case::unicode(r"k=caf\u00e9", "café")]
#[case::upper_hex_unicode(r"k=\u00C9", "É")]
#[case::surrogate_pair(r"k=\uD83D\uDE00", "\u{1F600}")]
#[case::trailing_backslash_dropped("k=end\\", "end")]
fn decodes_value_escapes(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(single(source).1, expected);
}

#[rstest]
#[case::equals(r"a\=b=c", "a=b", "c")]
#[case::colon(r"a\:b:c", "a:b", "c")]
#[case::space(r"a\ b c", "a b", "c")]
fn escaped_separators_stay_in_key(#[case] source: &str, #[case] key: &str, #[case] value: &str) {
    assert_eq!(single(source), (key.to_owned(), value.to_owned()));
}

#[test]
fn skips_comments_and_blank_lines() {
    let parsed = entries("# comment\n! also a comment\n\n   \n  # indented comment\nkey=value\n");
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.get("key").map(String::as_str), Some("value"));
}

#[test]
fn hash_inside_value_is_literal() {
    assert_eq!(single("key=a # b").1, "a # b");
}

#[test]
fn joins_continuation_lines() {
    let parsed = entries("fruits = apple, \\\n         banana, \\\n         pear\nnext=1\n");
    assert_eq!(
        parsed.get("fruits").map(String::as_str),
        Some("apple, banana, pear")
    );
    assert_eq!(parsed.get("next").map(String::as_str), Some("1"));
}

#[test]
fn even_backslashes_do_not_continue() {
    let parsed = entries("path=c:\\\\\nnext=1\n");
    assert_eq!(parsed.get("path").map(String::as_str), Some("c:\\"));
    assert_eq!(parsed.get("next").map(String::as_str), Some("1"));
}

#[test]
fn continuation_may_start_with_comment_marker() {
    let parsed = entries("key=first \\\n# not a comment\n");
    assert_eq!(
        parsed.get("key").map(String::as_str),
        Some("first # not a comment")
    );
}

#[test]
fn comment_lines_do_not_continue() {
    let parsed = entries("# comment \\\nkey=value\n");
    assert_eq!(parsed.get("key").map(String::as_str), Some("value"));
}

#[test]
fn later_duplicates_override_earlier_ones() {
    let parsed = entries("key=first\nkey=second\n");
    assert_eq!(parsed.get("key").map(String::as_str), Some("second"));
}

#[test]
fn accepts_crlf_line_endings() {
    let parsed = entries("a=1\r\nb=2\r\n");
    assert_eq!(parsed.get("a").map(String::as_str), Some("1"));
    assert_eq!(parsed.get("b").map(String::as_str), Some("2"));
}

#[test]
fn empty_source_has_no_entries() {
    assert!(entries("").is_empty());
}

#[rstest]
#[case::short_unicode("ok=1\nbad=\\u12", 2)]
#[case::non_hex_unicode("bad=\\uZZZZ", 1)]
#[case::lone_high_surrogate("bad=\\uD83D!", 1)]
#[case::lone_low_surrogate("bad=\\uDE00", 1)]
#[case::high_then_non_low("bad=\\uD83D\\u0041", 1)]
#[case::error_in_continued_entry("ok=1\nbad=a \\\n  \\u00", 2)]
fn reports_malformed_escapes(#[case] source: &str, #[case] line: usize) {
    let error = parse(source).expect_err("escape should be rejected");
    assert_eq!(error.line, line, "unexpected error: {error}");
}

#[test]
fn parse_error_message_names_the_line() {
    let error = parse("bad=\\u12").expect_err("escape should be rejected");
    assert_eq!(error.to_string(), "line 1: malformed \\uXXXX escape");
}
