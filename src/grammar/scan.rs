//! Boundary scanners
//!
//! Matchers for constructs that need backreferences or lookaround, which
//! the `regex` crate deliberately does not support. Each scanner documents
//! the pattern it is equivalent to; all of them return the shortest match
//! the lazy quantifiers of that pattern would produce.
//!
//! Every delimiter examined here is ASCII, so any byte offset where one is
//! found is also a `char` boundary and safe to slice at.

use crate::encode::is_word_byte;
use crate::engine::RuleMatch;

/// Byte offset of the `\n` ending the line that starts at `from`, or the
/// text length for the last line.
pub(crate) fn line_end(text: &str, from: usize) -> usize {
    text.as_bytes()[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(text.len(), |p| from + p)
}

/// Byte length of the first char of `text`, if any.
fn first_char_len(text: &str) -> Option<usize> {
    text.chars().next().map(char::len_utf8)
}

/// A `*`-delimited span on a single line: `^M(?!\*)(.+?)M(?!\*)` where `M`
/// is `marker` (`*` or `**`).
///
/// Group 1 is the span's interior.
pub(crate) fn starred_span<'a>(text: &'a str, marker: &str) -> Option<RuleMatch<'a>> {
    let bytes = text.as_bytes();
    let open = marker.len();

    if !text.starts_with(marker) || matches!(bytes.get(open), None | Some(b'*' | b'\n')) {
        return None;
    }

    let end = line_end(text, open);
    let close = (open + 1..end).find(|&j| {
        bytes[j..end].starts_with(marker.as_bytes()) && bytes.get(j + open) != Some(&b'*')
    })?;

    Some(RuleMatch::new(text, close + open).with_group(Some(&text[open..close])))
}

/// An HTML element: `^<(?:(\w+)\b[\s\S]+?</\1>|[\s\S]+?\s+/>)`.
///
/// Group 1 is the tag name of a paired element, absent for self-closing
/// ones.
pub(crate) fn element(text: &str) -> Option<RuleMatch<'_>> {
    if !text.starts_with('<') {
        return None;
    }

    paired_element(text).or_else(|| self_closing_element(text))
}

/// `<name …>…</name>`, closing at the first `</name>` after at least one
/// character of body.
fn paired_element(text: &str) -> Option<RuleMatch<'_>> {
    let name_len = text.as_bytes()[1..]
        .iter()
        .take_while(|&&b| is_word_byte(b))
        .count();
    if name_len == 0 {
        return None;
    }

    let name = &text[1..=name_len];
    let body = 1 + name_len;
    let search_from = body + first_char_len(&text[body..])?;
    let closing = format!("</{name}>");
    let close = search_from + text[search_from..].find(&closing)?;

    Some(RuleMatch::new(text, close + closing.len()).with_group(Some(name)))
}

/// `<… />`: at least one character, then whitespace, then `/>`.
fn self_closing_element(text: &str) -> Option<RuleMatch<'_>> {
    let bytes = text.as_bytes();
    let mut i = 1 + first_char_len(&text[1..])?;

    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let run_end = i + bytes[i..]
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        if bytes[run_end..].starts_with(b"/>") {
            return Some(RuleMatch::new(text, run_end + 2).with_group(None));
        }
        i = run_end;
    }

    None
}

/// An HTML comment: `^<!--[\s\S]*?-->`.
pub(crate) fn comment(text: &str) -> Option<RuleMatch<'_>> {
    const OPEN: &str = "<!--";
    const CLOSE: &str = "-->";

    if !text.starts_with(OPEN) {
        return None;
    }

    let close = OPEN.len() + text[OPEN.len()..].find(CLOSE)?;
    Some(RuleMatch::new(text, close + CLOSE.len()).with_group(None))
}

/// Whether `bytes` starts with two or more spaces followed by `\n`.
pub(crate) fn starts_with_break(bytes: &[u8]) -> bool {
    let spaces = bytes.iter().take_while(|&&b| b == b' ').count();
    spaces >= 2 && bytes.get(spaces) == Some(&b'\n')
}
