//! Block Grammar
//!
//! Line-oriented structure. Rule order, highest priority first:
//!
//! 1. heading   - `#` to `######` then title text on one line
//! 2. code      - lines indented by at least two spaces
//! 3. bullets   - lines starting with `-`
//! 4. numbers   - lines starting with `<digits>.`
//! 5. quote     - lines starting with `>`
//! 6. html      - a raw HTML element, self-closing element or comment
//! 7. paragraph - non-blank lines up to one that would open rules 1-6
//! 8. text      - a single line, encoded as-is
//! 9. newline   - blank lines, dropped
//!
//! Headings, lists and paragraphs hand their text to the inline grammar;
//! quotes re-enter this grammar on the de-quoted text, up to
//! [`MAX_QUOTE_DEPTH`] levels deep.

use super::inline::parse_inlines;
use super::scan;
use crate::encode::{encode, EncodeMode};
use crate::engine::{self, regex_match, Matcher, Rule, RuleMatch};
use crate::squash::{squash, wrap_list_items};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cell::Cell;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6}) *(.+)\n?").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^( {2}.*\n?)+").unwrap());
static BULLETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(- *.*\n?)+").unwrap());
static NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+\. *.*\n?)+").unwrap());
static QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(> *.*\n?)+").unwrap());
static TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+\n*").unwrap());
static NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\n+").unwrap());

static CODE_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^ {2}").unwrap());
static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^- *").unwrap());
static NUMBER_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[0-9]+\. *").unwrap());
static QUOTE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^> *").unwrap());

/// Block rules in priority order. Together, paragraph and newline are total.
pub static BLOCK_RULES: &[Rule] = &[
    Rule {
        name: "heading",
        matcher: match_heading,
        handler: render_heading,
    },
    Rule {
        name: "code",
        matcher: match_code,
        handler: render_code,
    },
    Rule {
        name: "bullets",
        matcher: match_bullets,
        handler: render_bullets,
    },
    Rule {
        name: "numbers",
        matcher: match_numbers,
        handler: render_numbers,
    },
    Rule {
        name: "quote",
        matcher: match_quote,
        handler: render_quote,
    },
    Rule {
        name: "html",
        matcher: match_html,
        handler: render_html,
    },
    Rule {
        name: "paragraph",
        matcher: match_paragraph,
        handler: render_paragraph,
    },
    Rule {
        name: "text",
        matcher: match_text,
        handler: render_text,
    },
    Rule {
        name: "newline",
        matcher: match_newline,
        handler: render_nothing,
    },
];

/// Quote levels that re-enter the block grammar. A quote nested deeper
/// renders its de-quoted text as one paragraph.
pub const MAX_QUOTE_DEPTH: usize = 64;

thread_local! {
    static QUOTE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// One level of quote recursion on this thread; released on drop.
struct QuoteLevel;

impl QuoteLevel {
    fn enter() -> Option<Self> {
        QUOTE_DEPTH.with(|depth| {
            if depth.get() >= MAX_QUOTE_DEPTH {
                return None;
            }
            depth.set(depth.get() + 1);
            Some(Self)
        })
    }
}

impl Drop for QuoteLevel {
    fn drop(&mut self) {
        QUOTE_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Blocks that end a paragraph when they start its next line.
const PARAGRAPH_INTERRUPTS: [Matcher; 6] = [
    match_html,
    match_heading,
    match_code,
    match_bullets,
    match_numbers,
    match_quote,
];

/// Render normalized text with the block grammar.
pub fn parse_blocks(text: &str) -> String {
    engine::parse(text, BLOCK_RULES)
}

fn match_heading(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&HEADING, text)
}

fn match_code(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&CODE, text)
}

fn match_bullets(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&BULLETS, text)
}

fn match_numbers(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&NUMBERS, text)
}

fn match_quote(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&QUOTE, text)
}

fn match_html(text: &str) -> Option<RuleMatch<'_>> {
    scan::comment(text).or_else(|| scan::element(text))
}

/// One or more non-blank lines. A line joins the paragraph only if it is
/// not blank and does not open a heading, code, list, quote or html block;
/// the blank lines after the last joined line are consumed too.
fn match_paragraph(text: &str) -> Option<RuleMatch<'_>> {
    let mut end = scan::line_end(text, 0);
    if end == 0 {
        return None;
    }

    while end < text.len() {
        let next = end + 1;
        let next_end = scan::line_end(text, next);
        if next_end == next || starts_block(&text[next..]) {
            break;
        }
        end = next_end;
    }

    let newlines = text.as_bytes()[end..]
        .iter()
        .take_while(|&&b| b == b'\n')
        .count();
    Some(RuleMatch::new(text, end + newlines))
}

fn starts_block(text: &str) -> bool {
    PARAGRAPH_INTERRUPTS
        .iter()
        .any(|matcher| matcher(text).is_some())
}

fn match_text(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&TEXT, text)
}

fn match_newline(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&NEWLINE, text)
}

fn render_heading(m: &RuleMatch<'_>) -> String {
    let level = m.group(1).map_or(1, str::len);
    let title = parse_inlines(m.group(2).unwrap_or_default());
    format!("<h{level}>{title}</h{level}>\n")
}

fn render_code(m: &RuleMatch<'_>) -> String {
    let code = encode(&squash(&CODE_INDENT, m.as_str()), EncodeMode::Full);
    format!("<pre>\n{code}\n</pre>\n")
}

fn render_bullets(m: &RuleMatch<'_>) -> String {
    let items = wrap_list_items(&parse_inlines(&squash(&BULLET_MARKER, m.as_str())));
    format!("<ul>\n{items}\n</ul>\n")
}

fn render_numbers(m: &RuleMatch<'_>) -> String {
    let items = wrap_list_items(&parse_inlines(&squash(&NUMBER_MARKER, m.as_str())));
    format!("<ol>\n{items}\n</ol>\n")
}

fn render_quote(m: &RuleMatch<'_>) -> String {
    let text = squash(&QUOTE_MARKER, m.as_str());
    let inner = if let Some(_level) = QuoteLevel::enter() {
        parse_blocks(&text)
    } else {
        tracing::warn!(
            max_depth = MAX_QUOTE_DEPTH,
            "quote nesting too deep; rendering remainder as a paragraph"
        );
        render_flat_quote(&text)
    };
    format!("<blockquote>\n{inner}</blockquote>\n")
}

fn render_flat_quote(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!("<p>{}</p>\n", parse_inlines(text))
}

/// Raw HTML passes through untouched, except that a `pre` element has its
/// content run through the inline grammar.
fn render_html(m: &RuleMatch<'_>) -> String {
    let html = format!("{}\n", m.as_str());
    match m.group(1) {
        Some("pre") => parse_inlines(&html),
        _ => html,
    }
}

fn render_paragraph(m: &RuleMatch<'_>) -> String {
    let text = parse_inlines(m.as_str().trim_end_matches('\n'));
    format!("<p>{text}</p>\n")
}

fn render_text(m: &RuleMatch<'_>) -> String {
    encode(m.as_str(), EncodeMode::PreserveEntities)
}

fn render_nothing(_: &RuleMatch<'_>) -> String {
    String::new()
}
