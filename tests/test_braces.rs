// Copyright (C) Brian G. Milnes 2025

//! Tests for matching bracket search

use codemods::{find_call_parens, find_closing_brace, src_to_tokens, UpgradeError};

#[test]
fn test_outer_parenthesis_spans_nested_delimiters() {
    let tokens = src_to_tokens("f(a, [b, (c)], {d: e})").unwrap();

    assert_eq!(find_closing_brace(&tokens, 1).unwrap(), tokens.len());
    // `[` at 5 closes at 12
    assert_eq!(tokens[5].text, "[");
    assert_eq!(find_closing_brace(&tokens, 5).unwrap(), 13);
    // `(` at 9 closes at 11
    assert_eq!(find_closing_brace(&tokens, 9).unwrap(), 12);
}

#[test]
fn test_delimiters_inside_strings_and_comments_are_ignored() {
    let tokens = src_to_tokens("f(\")\", x  # (\n)").unwrap();
    assert_eq!(find_closing_brace(&tokens, 1).unwrap(), tokens.len());
}

#[test]
fn test_mismatched_close_is_an_invariant_violation() {
    let tokens = src_to_tokens("f(a, [b)").unwrap();
    let err = find_closing_brace(&tokens, 1).unwrap_err();
    assert!(matches!(err, UpgradeError::InternalInvariant(_)));
}

#[test]
fn test_unclosed_delimiter_is_an_invariant_violation() {
    let tokens = src_to_tokens("f(a, (b)").unwrap();
    assert!(matches!(
        find_closing_brace(&tokens, 1),
        Err(UpgradeError::InternalInvariant(_))
    ));
}

#[test]
fn test_start_must_be_an_opening_delimiter() {
    let tokens = src_to_tokens("f(a)").unwrap();
    assert!(find_closing_brace(&tokens, 0).is_err());
    assert!(find_closing_brace(&tokens, 99).is_err());
}

#[test]
fn test_call_parens_after_callee() {
    let tokens = src_to_tokens("Success(foo=1)").unwrap();
    assert_eq!(find_call_parens(&tokens, 0).unwrap(), (1, tokens.len()));
}

#[test]
fn test_call_parens_skip_blanks_before_parenthesis() {
    let tokens = src_to_tokens("Success (foo=1) + 1").unwrap();
    let (open, end) = find_call_parens(&tokens, 0).unwrap();
    assert_eq!(open, 2);
    assert_eq!(tokens[end - 1].text, ")");
}

#[test]
fn test_call_parens_require_a_parenthesis() {
    let tokens = src_to_tokens("Success.value").unwrap();
    assert!(matches!(
        find_call_parens(&tokens, 0),
        Err(UpgradeError::InternalInvariant(_))
    ));
}
