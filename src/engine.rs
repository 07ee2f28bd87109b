//! Generic Rule-Table Engine
//!
//! A grammar is an ordered slice of [`Rule`]s. [`parse`] repeatedly finds the
//! first rule whose matcher accepts a non-empty prefix of the remaining
//! buffer, appends that rule's handler output, and advances past the prefix
//! until the buffer is empty.
//!
//! ## Ordering
//!
//! Rules are tried in declaration order and the first match wins. This is a
//! priority grammar, not a longest-match union: a later rule never sees text
//! an earlier rule accepted.
//!
//! ## Totality
//!
//! The loop only terminates if every non-empty buffer is matched by some
//! rule, so each grammar ends with a catch-all rule that accepts at least one
//! character of any input. Nothing in the types enforces this; the grammar
//! tests check it. Should a table ever fail to match, the remainder is
//! emitted as encoded text and an error event is logged rather than spinning.

use crate::encode::{encode, EncodeMode};
use regex::Regex;

/// A successful match: the consumed prefix plus its capture groups.
///
/// Group 0 is the whole consumed prefix. Groups 1.. are optional, so a rule
/// can report that e.g. an image title was absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    groups: Vec<Option<&'a str>>,
}

impl<'a> RuleMatch<'a> {
    /// Match consuming the first `len` bytes of `text`, with no groups yet.
    pub fn new(text: &'a str, len: usize) -> Self {
        Self {
            groups: vec![Some(&text[..len])],
        }
    }

    /// Append the next capture group.
    pub fn with_group(mut self, group: Option<&'a str>) -> Self {
        self.groups.push(group);
        self
    }

    /// Build a match from regex captures, keeping every group slot.
    pub fn from_captures(caps: &regex::Captures<'a>) -> Self {
        Self {
            groups: caps.iter().map(|g| g.map(|m| m.as_str())).collect(),
        }
    }

    /// Number of bytes consumed.
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whole consumed prefix.
    pub fn as_str(&self) -> &'a str {
        self.groups.first().copied().flatten().unwrap_or("")
    }

    /// Capture group `index`, or `None` if it did not participate.
    pub fn group(&self, index: usize) -> Option<&'a str> {
        self.groups.get(index).copied().flatten()
    }
}

/// Tests whether a rule accepts a prefix of the text.
pub type Matcher = for<'a> fn(&'a str) -> Option<RuleMatch<'a>>;

/// Renders a match into an output fragment (possibly empty).
pub type Handler = fn(&RuleMatch<'_>) -> String;

/// One entry of a rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matcher: Matcher,
    pub handler: Handler,
}

impl Rule {
    /// Run the matcher, treating a zero-length match as no match.
    pub fn try_match<'a>(&self, text: &'a str) -> Option<RuleMatch<'a>> {
        (self.matcher)(text).filter(|m| !m.is_empty())
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Match an anchored (`^…`) regex against the start of `text`.
pub fn regex_match<'a>(regex: &Regex, text: &'a str) -> Option<RuleMatch<'a>> {
    regex
        .captures(text)
        .filter(|caps| caps.get(0).is_some_and(|m| m.start() == 0))
        .map(|caps| RuleMatch::from_captures(&caps))
}

/// Find the highest-priority rule accepting a prefix of `text`.
pub fn first_match<'r, 'a>(text: &'a str, rules: &'r [Rule]) -> Option<(&'r Rule, RuleMatch<'a>)> {
    rules
        .iter()
        .find_map(|rule| rule.try_match(text).map(|m| (rule, m)))
}

/// Consume `text` with `rules`, concatenating handler output.
pub fn parse(text: &str, rules: &[Rule]) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while !rest.is_empty() {
        let Some((rule, matched)) = first_match(rest, rules) else {
            tracing::error!(
                remaining = rest.len(),
                "rule table is not total; emitting remainder as text"
            );
            output.push_str(&encode(rest, EncodeMode::PreserveEntities));
            break;
        };

        tracing::trace!(rule = rule.name, consumed = matched.len(), "rule applied");
        output.push_str(&(rule.handler)(&matched));
        rest = &rest[matched.len()..];
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z]+)").unwrap());

    fn word(text: &str) -> Option<RuleMatch<'_>> {
        regex_match(&WORD, text)
    }

    fn any_char(text: &str) -> Option<RuleMatch<'_>> {
        text.chars().next().map(|c| RuleMatch::new(text, c.len_utf8()))
    }

    fn never(_: &str) -> Option<RuleMatch<'_>> {
        None
    }

    fn empty(text: &str) -> Option<RuleMatch<'_>> {
        Some(RuleMatch::new(text, 0))
    }

    fn bracket_word(m: &RuleMatch<'_>) -> String {
        format!("[{}]", m.group(1).unwrap_or_default())
    }

    fn echo(m: &RuleMatch<'_>) -> String {
        m.as_str().to_string()
    }

    fn nothing(_: &RuleMatch<'_>) -> String {
        String::new()
    }

    const TOTAL: &[Rule] = &[
        Rule {
            name: "empty",
            matcher: empty,
            handler: nothing,
        },
        Rule {
            name: "word",
            matcher: word,
            handler: bracket_word,
        },
        Rule {
            name: "char",
            matcher: any_char,
            handler: echo,
        },
    ];

    #[test]
    fn test_first_matching_rule_wins() {
        assert_eq!(parse("ab cd!", TOTAL), "[ab] [cd]!");
    }

    #[test]
    fn test_empty_input_produces_empty_output() {
        assert_eq!(parse("", TOTAL), "");
    }

    #[test]
    fn test_zero_length_match_is_skipped() {
        let (rule, m) = first_match("x", TOTAL).unwrap();
        assert_eq!(rule.name, "word");
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_non_total_table_does_not_hang() {
        let partial = &[Rule {
            name: "never",
            matcher: never,
            handler: nothing,
        }];
        assert_eq!(parse("a<b", partial), "a&lt;b");
    }

    #[test]
    fn test_regex_match_requires_prefix() {
        assert!(regex_match(&WORD, "1abc").is_none());
        let m = regex_match(&WORD, "abc1").unwrap();
        assert_eq!(m.as_str(), "abc");
        assert_eq!(m.group(1), Some("abc"));
        assert_eq!(m.group(2), None);
    }

    #[test]
    fn test_rule_match_groups_are_sparse() {
        let m = RuleMatch::new("abcdef", 4)
            .with_group(Some("ab"))
            .with_group(None)
            .with_group(Some("d"));
        assert_eq!(m.len(), 4);
        assert_eq!(m.group(1), Some("ab"));
        assert_eq!(m.group(2), None);
        assert_eq!(m.group(3), Some("d"));
        assert_eq!(m.group(9), None);
    }
}
