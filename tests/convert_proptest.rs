//! Property-based tests for the converter
//!
//! These check the guarantees that the types cannot: both rule tables are
//! total, conversion terminates on hostile input, plain prose becomes a
//! single paragraph, and encoding leaves markup-free text alone.

use plainmark::engine::first_match;
use plainmark::grammar::{BLOCK_RULES, INLINE_RULES, MAX_QUOTE_DEPTH};
use plainmark::{convert, encode, EncodeMode};
use proptest::prelude::*;

/// Characters that open or close some rule, plus a little filler.
fn special_char_strategy() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        '\\', '<', '>', '[', ']', '*', '`', '"', '#', '-', '.', '/', '!', ' ', '\n', 'a', '1',
        'é',
    ])
}

/// Arbitrary non-empty text, newlines and multi-byte chars included.
fn any_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 1..64).prop_map(String::from_iter)
}

/// Dense runs of special characters.
fn hostile_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(special_char_strategy(), 0..400).prop_map(String::from_iter)
}

/// Lines of prose that cannot open a block or contain inline markup.
fn plain_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        "[a-zA-Z][a-zA-Z0-9,.!?&;'\" ]{0,30}[a-zA-Z0-9.!?]",
        1..5,
    )
    .prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn test_block_rules_are_total(input in any_text_strategy()) {
        let (rule, matched) = first_match(&input, BLOCK_RULES)
            .expect("some block rule must match");
        prop_assert!(matched.len() > 0, "{} matched nothing", rule.name);
        prop_assert!(input.is_char_boundary(matched.len()));
    }

    #[test]
    fn test_inline_rules_are_total(input in any_text_strategy()) {
        let (rule, matched) = first_match(&input, INLINE_RULES)
            .expect("some inline rule must match");
        prop_assert!(matched.len() > 0, "{} matched nothing", rule.name);
        prop_assert!(input.is_char_boundary(matched.len()));
    }

    #[test]
    fn test_hostile_input_terminates_deterministically(input in hostile_text_strategy()) {
        let first = convert(&input);
        let second = convert(&input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_plain_text_becomes_one_paragraph(text in plain_text_strategy()) {
        let expected = format!("<p>{}</p>\n", encode(&text, EncodeMode::PreserveEntities));
        prop_assert_eq!(convert(&text), expected.clone());
        prop_assert_eq!(convert(&format!("{text}\n")), expected);
    }

    #[test]
    fn test_encode_leaves_markup_free_text_unchanged(text in "[^<>&]*") {
        prop_assert_eq!(encode(&text, EncodeMode::PreserveEntities), text.clone());
        prop_assert_eq!(encode(&text, EncodeMode::Full), text);
    }
}

/// Long runs of a single special character must not backtrack
/// catastrophically.
#[test]
fn test_long_special_runs_finish() {
    let runs = [
        "*".repeat(5_000),
        "**a".repeat(2_000),
        "<".repeat(5_000),
        "<a ".repeat(2_000),
        "[\"".repeat(2_000),
        "`".repeat(5_000),
        "\\".repeat(5_000),
        " ".repeat(5_000) + "\n",
        "- \n".repeat(2_000),
        "x\n".repeat(2_000) + "<div>",
    ];

    for input in &runs {
        let output = convert(input);
        assert!(!output.is_empty(), "no output for run of {:?}", &input[..3]);
    }
}

#[test]
fn test_deep_quote_nesting() {
    let input = format!("{}deep", "> ".repeat(50));
    let output = convert(&input);

    assert_eq!(output.matches("<blockquote>").count(), 50);
    assert!(output.contains("<p>deep</p>"));
}

#[test]
fn test_quote_run_on_small_stack() {
    let worker = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(|| convert(&">".repeat(100_000)))
        .unwrap();
    let output = worker.join().expect("conversion overflowed a 2 MB stack");

    assert_eq!(output.matches("<blockquote>").count(), MAX_QUOTE_DEPTH + 1);
    assert_eq!(output.matches("</blockquote>").count(), MAX_QUOTE_DEPTH + 1);
    assert!(output.contains("<p>&gt;&gt;"));
}
