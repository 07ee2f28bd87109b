//! Inline Grammar
//!
//! Character-level formatting inside the leaf text handed over by block
//! handlers. Rule order, highest priority first:
//!
//! 1. escape   - `\` before one of ``\ ` * [ ] ( ) # - . >``
//! 2. strong   - `**…**`, never adjacent to a third `*`
//! 3. emphasis - `*…*`, never adjacent to a second `*`
//! 4. command  - `` `…` `` code span
//! 5. link     - `<"url" "text" "title">`
//! 6. image    - `["src" "alt" "title"]`
//! 7. tag      - raw inline HTML element
//! 8. br       - two or more spaces before a single newline
//! 9. text     - catch-all run up to the next special character
//!
//! Strong and emphasis recurse into this grammar for their interior. Code
//! spans, tags and escapes do not.

use super::scan;
use crate::encode::{encode, EncodeMode};
use crate::engine::{self, regex_match, Rule, RuleMatch};
use once_cell::sync::Lazy;
use regex::Regex;

static ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\\([\\`*\[\]()#\-.>])").unwrap());
static COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"^`(.+?)`").unwrap());
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^<(".+?") *(".+?")? *(".+?")?>"#).unwrap());
static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\[(".+?") *(".+?")? *(".+?")?\]"#).unwrap());

/// Inline rules in priority order. The last rule is total.
pub static INLINE_RULES: &[Rule] = &[
    Rule {
        name: "escape",
        matcher: match_escape,
        handler: render_escape,
    },
    Rule {
        name: "strong",
        matcher: match_strong,
        handler: render_strong,
    },
    Rule {
        name: "emphasis",
        matcher: match_emphasis,
        handler: render_emphasis,
    },
    Rule {
        name: "command",
        matcher: match_command,
        handler: render_command,
    },
    Rule {
        name: "link",
        matcher: match_link,
        handler: render_link,
    },
    Rule {
        name: "image",
        matcher: match_image,
        handler: render_image,
    },
    Rule {
        name: "tag",
        matcher: scan::element,
        handler: render_verbatim,
    },
    Rule {
        name: "br",
        matcher: match_break,
        handler: render_break,
    },
    Rule {
        name: "text",
        matcher: match_text,
        handler: render_text,
    },
];

/// Render leaf text with the inline grammar.
pub fn parse_inlines(text: &str) -> String {
    engine::parse(text, INLINE_RULES)
}

fn match_escape(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&ESCAPE, text)
}

fn match_strong(text: &str) -> Option<RuleMatch<'_>> {
    scan::starred_span(text, "**")
}

fn match_emphasis(text: &str) -> Option<RuleMatch<'_>> {
    scan::starred_span(text, "*")
}

fn match_command(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&COMMAND, text)
}

fn match_link(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&LINK, text)
}

fn match_image(text: &str) -> Option<RuleMatch<'_>> {
    regex_match(&IMAGE, text)
}

/// `^ {2,}\n(?!\n)`
fn match_break(text: &str) -> Option<RuleMatch<'_>> {
    let bytes = text.as_bytes();
    if !scan::starts_with_break(bytes) {
        return None;
    }

    let newline = bytes.iter().position(|&b| b == b'\n')?;
    if bytes.get(newline + 1) == Some(&b'\n') {
        return None;
    }
    Some(RuleMatch::new(text, newline + 1))
}

/// `^[\s\S]+?(?=[\\<\[*`]| {2,}\n|$)`: at least one char, stopping before
/// the next special character, the next hard break, or the end of input
/// (where a single final newline is left for the caller).
fn match_text(text: &str) -> Option<RuleMatch<'_>> {
    let bytes = text.as_bytes();
    let first = text.chars().next()?.len_utf8();

    // Only ASCII bytes can stop the run, so every stop is a char boundary.
    let end = (first..bytes.len())
        .find(|&p| {
            matches!(bytes[p], b'\\' | b'<' | b'[' | b'*' | b'`')
                || (bytes[p] == b'\n' && p + 1 == bytes.len())
                || scan::starts_with_break(&bytes[p..])
        })
        .unwrap_or(bytes.len());

    Some(RuleMatch::new(text, end))
}

fn render_escape(m: &RuleMatch<'_>) -> String {
    m.group(1).unwrap_or_default().to_string()
}

fn render_strong(m: &RuleMatch<'_>) -> String {
    format!("<strong>{}</strong>", parse_inlines(m.group(1).unwrap_or_default()))
}

fn render_emphasis(m: &RuleMatch<'_>) -> String {
    format!("<em>{}</em>", parse_inlines(m.group(1).unwrap_or_default()))
}

fn render_command(m: &RuleMatch<'_>) -> String {
    let code = encode(m.group(1).unwrap_or_default(), EncodeMode::PreserveEntities);
    format!("<code>{code}</code>")
}

/// Attribute values are the captured groups verbatim, quotes included.
/// With three groups the title attribute repeats the URL group.
fn render_link(m: &RuleMatch<'_>) -> String {
    let url = m.group(1).unwrap_or_default();
    let title = match m.group(3) {
        Some(_) => format!(" title={url}"),
        None => String::new(),
    };
    let label = m.group(2).unwrap_or(url).trim_matches('"');

    format!("<a href={url}{title}>{label}</a>")
}

fn render_image(m: &RuleMatch<'_>) -> String {
    let src = m.group(1).unwrap_or_default();
    let title = m
        .group(3)
        .map(|title| format!(" title={title}"))
        .unwrap_or_default();
    let alt = m
        .group(2)
        .map(|alt| format!(" alt={alt}"))
        .unwrap_or_default();

    format!("<img src={src}{title}{alt} />")
}

fn render_verbatim(m: &RuleMatch<'_>) -> String {
    m.as_str().to_string()
}

/// Emits `<br />` and the newline. The trailing spaces that formed the break
/// are dropped, so this differs byte for byte from converters that echo the
/// whole `  \n` run after the tag.
fn render_break(_: &RuleMatch<'_>) -> String {
    "<br />\n".to_string()
}

fn render_text(m: &RuleMatch<'_>) -> String {
    encode(m.as_str(), EncodeMode::PreserveEntities)
}
