//! The two grammars driven by the rule-table engine
//!
//! [`block`] handles whole lines and calls into [`inline`] for leaf text;
//! block quotes call back into [`block`]. Both tables are immutable statics,
//! so a conversion holds no state beyond its own buffers.

pub mod block;
pub mod inline;
mod scan;

pub use block::{parse_blocks, BLOCK_RULES, MAX_QUOTE_DEPTH};
pub use inline::{parse_inlines, INLINE_RULES};
