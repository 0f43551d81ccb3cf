use super::engine::{first_match, ParseRule, RuleContext, RuleMatch};
use super::key_value::label_pattern;
use super::line_cursor::{has_content, next_line, require_line};
use crate::error::{NoteError, NoteResult};
use crate::types::{ItemKind, NoteItem};
use regex::Regex;

/// Section header (`<label>:` alone on its line) plus the body up to the next
/// header or the end of the text.
///
/// The body is segmented with the context's body rules only, so sections
/// never nest.
#[derive(Debug, Clone)]
pub struct HeaderContentRule {
    pattern: Regex,
}

impl HeaderContentRule {
    pub fn new(max_label_tokens: usize) -> NoteResult<Self> {
        let pattern = Regex::new(&format!(
            r"^\s*(?P<header>{}):\s*$",
            label_pattern(max_label_tokens)
        ))?;
        Ok(Self { pattern })
    }

    /// Header label when `line` is a header-only line.
    pub fn header_label<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.name("header"))
            .map(|m| m.as_str().trim_end())
    }

    /// Lookahead: does the next non-blank line open a new section?
    fn at_header(&self, text: &str) -> bool {
        next_line(text, false).is_some_and(|next| self.header_label(next.line).is_some())
    }
}

impl ParseRule for HeaderContentRule {
    fn try_update<'t>(&self, text: &'t str, ctx: &RuleContext<'_>) -> NoteResult<Option<RuleMatch<'t>>> {
        let first = require_line(text)?;
        let Some(label) = self.header_label(first.line) else {
            return Ok(None);
        };

        let mut children = Vec::new();
        let mut rest = first.rest;
        while has_content(rest) && !self.at_header(rest) {
            if children.len() >= ctx.max_items {
                return Err(NoteError::IterationLimit {
                    limit: ctx.max_items,
                });
            }
            let matched = first_match(ctx.body_rules, rest, ctx)?.ok_or(NoteError::NoContent)?;
            children.push(matched.item);
            rest = matched.rest;
        }

        Ok(Some(RuleMatch {
            item: NoteItem::list(ItemKind::Section, Some(label.to_string()), children),
            rest,
        }))
    }

    fn name(&self) -> &'static str {
        "HeaderContent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfig;
    use crate::rules::engine::NoteRule;

    #[test]
    fn test_header_label() {
        let rule = HeaderContentRule::new(5).unwrap();
        assert_eq!(rule.header_label("Diagnosis:"), Some("Diagnosis"));
        assert_eq!(rule.header_label("  History of Present Illness:  "), Some("History of Present Illness"));
        assert_eq!(rule.header_label("Diagnosis :"), Some("Diagnosis"));
        assert_eq!(rule.header_label("BP: 120/80"), None);
        assert_eq!(rule.header_label("no colon"), None);
        assert_eq!(rule.header_label("this header has far too many words:"), None);
    }

    #[test]
    fn test_section_stops_at_next_header() {
        let rule = HeaderContentRule::new(5).unwrap();
        let body_rules = NoteRule::leaf_rules(&ParsingConfig::default()).unwrap();
        let classifier = |_: &str| false;
        let ctx = RuleContext {
            classifier: &classifier,
            body_rules: &body_rules,
            max_items: 100,
        };

        let matched = rule
            .try_update("Diagnosis:\nflu\n\nTreatment:\nrest\n", &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(matched.item.label.as_deref(), Some("Diagnosis"));
        assert_eq!(matched.item.children().len(), 1);
        assert_eq!(matched.item.children()[0].text(), Some("flu"));
        assert_eq!(matched.rest, "\nTreatment:\nrest\n");
    }

    #[test]
    fn test_non_header_leaves_text_untouched() {
        let rule = HeaderContentRule::new(5).unwrap();
        let classifier = |_: &str| false;
        let ctx = RuleContext {
            classifier: &classifier,
            body_rules: &[],
            max_items: 100,
        };
        assert!(rule.try_update("BP: 120/80\n", &ctx).unwrap().is_none());
    }

    #[test]
    fn test_empty_section() {
        let rule = HeaderContentRule::new(5).unwrap();
        let classifier = |_: &str| false;
        let ctx = RuleContext {
            classifier: &classifier,
            body_rules: &[],
            max_items: 100,
        };
        let matched = rule.try_update("Allergies:\n\n", &ctx).unwrap().unwrap();
        assert!(matched.item.children().is_empty());
        assert!(!has_content(matched.rest));
    }

    #[test]
    fn test_section_item_limit() {
        let rule = HeaderContentRule::new(5).unwrap();
        let body_rules = NoteRule::leaf_rules(&ParsingConfig::default()).unwrap();
        let classifier = |_: &str| false;
        let ctx = RuleContext {
            classifier: &classifier,
            body_rules: &body_rules,
            max_items: 2,
        };
        let result = rule.try_update("Plan:\na\nb\nc\n", &ctx);
        assert!(matches!(result, Err(NoteError::IterationLimit { limit: 2 })));
    }
}
