//! # plainmark
//!
//! Converts a small Markdown-like dialect to HTML with two ordered rule
//! tables: a block grammar for headings, code, lists, quotes, raw HTML and
//! paragraphs, and an inline grammar for escapes, emphasis, code spans,
//! links, images, inline tags and hard breaks.
//!
//! ```text
//! convert("# Hello")  => "<h1>Hello</h1>\n"
//! convert("- a\n- b") => "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n"
//! ```
//!
//! ## Layout
//!
//! - [`normalize`]: line endings and tabs
//! - [`engine`]: the generic first-match-wins rule-table parser
//! - [`grammar`]: the block and inline rule tables
//! - [`encode`] and [`squash`]: helpers the rule handlers share
//!
//! Conversion is a pure function. Rule tables are immutable statics, so
//! [`convert`] can be called from any number of threads at once.
//!
//! ## Cost
//!
//! Every rule scans forward from the current position at most to the end of
//! the input, and each application consumes at least one character, so one
//! pass of a grammar is at worst quadratic in the input length. Nested
//! quotes and nested emphasis re-parse their interior once per level, which
//! multiplies that by the nesting depth. Callers handling untrusted input
//! can cap the length with [`Converter::with_max_input_len`].

pub mod converter;
pub mod encode;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod normalize;
pub mod squash;

pub use converter::{convert, ConvertConfig, Converter};
pub use encode::{encode, EncodeMode};
pub use engine::{parse, Rule, RuleMatch};
pub use error::ConvertError;
pub use normalize::normalize;
pub use squash::{squash, wrap_list_items};
