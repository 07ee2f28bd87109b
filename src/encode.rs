//! HTML entity encoding for text nodes
//!
//! `<` and `>` are always escaped. Ampersands depend on the [`EncodeMode`]:
//! code content escapes every `&`, while prose leaves an `&` alone when it
//! already starts an entity reference such as `&amp;`, `&#39;` or `&copy;`.

/// How ampersands are treated by [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeMode {
    /// Escape `&` unless it begins an entity reference (`&#?\w+;`).
    #[default]
    PreserveEntities,
    /// Escape every `&`. Used for code blocks.
    Full,
}

/// Escape `text` for embedding in an HTML text node.
pub fn encode(text: &str, mode: EncodeMode) -> String {
    let mut out = String::with_capacity(text.len());

    for (i, c) in text.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' if mode == EncodeMode::Full || !starts_entity(&text[i + 1..]) => {
                out.push_str("&amp;")
            }
            c => out.push(c),
        }
    }

    out
}

/// Whether the text right after an `&` reads as `#?\w+;`.
fn starts_entity(rest: &str) -> bool {
    let bytes = rest.as_bytes();
    let start = usize::from(bytes.first() == Some(&b'#'));
    let word_len = bytes[start..]
        .iter()
        .take_while(|b| is_word_byte(**b))
        .count();

    word_len > 0 && bytes.get(start + word_len) == Some(&b';')
}

/// ASCII `\w`: letters, digits and underscore.
pub(crate) fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
