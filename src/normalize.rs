//! Input normalization
//!
//! Runs once before block parsing. Every line ending (`\r\n` or a lone `\r`)
//! becomes `\n`, and every tab becomes a run of [`TAB_WIDTH`] spaces, so the
//! grammars only ever have to reason about `\n` and spaces.

/// Number of spaces a tab expands to.
pub const TAB_WIDTH: usize = 2;

/// Rewrite line endings to `\n` and expand tabs.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\t' => out.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
            c => out.push(c),
        }
    }

    out
}
