use super::engine::{ParseRule, RuleContext, RuleMatch};
use super::line_cursor::require_line;
use crate::error::NoteResult;
use crate::types::{ItemKind, NoteItem};
use regex::Regex;

/// Label pattern shared by key/value lines and section headers: 1..=N
/// whitespace-separated tokens of word characters, `/`, `_` or `-`.
pub(crate) fn label_pattern(max_tokens: usize) -> String {
    format!(r"(?:[\w/_-]+\s*){{1,{max_tokens}}}")
}

/// `<label>: <value>` on a single line.
///
/// The token bound keeps prose that happens to contain a colon from being
/// read as a field.
#[derive(Debug, Clone)]
pub struct KeyValueRule {
    pattern: Regex,
}

impl KeyValueRule {
    pub fn new(max_label_tokens: usize) -> NoteResult<Self> {
        let pattern = Regex::new(&format!(
            r"^\s*(?P<key>{}):\s*(?P<value>.+)",
            label_pattern(max_label_tokens)
        ))?;
        Ok(Self { pattern })
    }

    /// Split a line into `(label, value)` when it is a key/value line.
    pub fn split<'l>(&self, line: &'l str) -> Option<(&'l str, &'l str)> {
        let caps = self.pattern.captures(line)?;
        let key = caps.name("key")?.as_str().trim_end();
        let value = caps.name("value")?.as_str();
        Some((key, value))
    }
}

impl ParseRule for KeyValueRule {
    fn try_update<'t>(&self, text: &'t str, ctx: &RuleContext<'_>) -> NoteResult<Option<RuleMatch<'t>>> {
        let next = require_line(text)?;
        Ok(self.split(next.line).map(|(key, value)| RuleMatch {
            item: NoteItem::labeled_leaf(ItemKind::KeyValue, key, ctx.span(value)),
            rest: next.rest,
        }))
    }

    fn name(&self) -> &'static str {
        "KeyValue"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> KeyValueRule {
        KeyValueRule::new(5).unwrap()
    }

    #[test]
    fn test_simple_pair() {
        assert_eq!(rule().split("BP: 120/80"), Some(("BP", "120/80")));
        assert_eq!(rule().split("  Blood pressure : 120/80"), Some(("Blood pressure", "120/80")));
    }

    #[test]
    fn test_label_characters() {
        assert_eq!(rule().split("follow-up/next_visit: 2 weeks"), Some(("follow-up/next_visit", "2 weeks")));
    }

    #[test]
    fn test_token_bound() {
        assert_eq!(rule().split("one two three four five: ok"), Some(("one two three four five", "ok")));
        assert_eq!(rule().split("one two three four five six: too long"), None);
    }

    #[test]
    fn test_value_required() {
        assert_eq!(rule().split("Diagnosis:"), None);
        assert_eq!(rule().split("Diagnosis:   "), Some(("Diagnosis", " ")));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        assert_eq!(rule().split("Time: 10:30"), Some(("Time", "10:30")));
    }

    #[test]
    fn test_numbered_marker_is_not_a_key() {
        assert_eq!(rule().split("1. Pain: severe"), None);
    }
}
