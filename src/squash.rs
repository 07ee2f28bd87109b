//! Block-content helpers shared by the list and quote rules
//!
//! [`squash`] strips a structural marker from the start of every line of a
//! matched block and drops the block's trailing newlines. [`wrap_list_items`]
//! runs after inline parsing and wraps each non-empty line in `<li>`.

use once_cell::sync::Lazy;
use regex::Regex;

static LIST_ITEM_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^.+$").unwrap());

/// Remove `marker` from the start of every line, then trim trailing newlines.
///
/// `marker` must be anchored per line, e.g. `(?m)^- *`.
pub fn squash(marker: &Regex, text: &str) -> String {
    let stripped = marker.replace_all(text, "");
    stripped.trim_end_matches('\n').to_string()
}

/// Wrap every non-empty line of already-rendered HTML in a list item.
pub fn wrap_list_items(html: &str) -> String {
    LIST_ITEM_LINE.replace_all(html, "<li>${0}</li>").into_owned()
}
