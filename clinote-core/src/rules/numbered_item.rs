use super::engine::{ParseRule, RuleContext, RuleMatch};
use super::line_cursor::require_line;
use crate::error::NoteResult;
use crate::types::{ItemKind, NoteItem};
use regex::Regex;

/// `<digits>. <content>` on a single line. Nested numbering is not followed.
#[derive(Debug, Clone)]
pub struct NumberedItemRule {
    pattern: Regex,
}

impl NumberedItemRule {
    pub fn new() -> NoteResult<Self> {
        Ok(Self {
            pattern: Regex::new(r"^\s*[0-9]+\.\s+(?P<item>.*)")?,
        })
    }

    /// Content after the list marker, when the line is a numbered item.
    pub fn content<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.name("item"))
            .map(|m| m.as_str())
    }
}

impl ParseRule for NumberedItemRule {
    fn try_update<'t>(&self, text: &'t str, ctx: &RuleContext<'_>) -> NoteResult<Option<RuleMatch<'t>>> {
        let next = require_line(text)?;
        Ok(self.content(next.line).map(|content| RuleMatch {
            item: NoteItem::leaf(ItemKind::ListItem, ctx.span(content)),
            rest: next.rest,
        }))
    }

    fn name(&self) -> &'static str {
        "NumberedItem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_lines() {
        let rule = NumberedItemRule::new().unwrap();
        assert_eq!(rule.content("1. chest pain"), Some("chest pain"));
        assert_eq!(rule.content("  12.   aspirin 81mg"), Some("aspirin 81mg"));
        assert_eq!(rule.content("3. "), Some(""));
    }

    #[test]
    fn test_not_numbered() {
        let rule = NumberedItemRule::new().unwrap();
        assert_eq!(rule.content("1.5 mg daily"), None);
        assert_eq!(rule.content("a. first"), None);
        assert_eq!(rule.content("1) first"), None);
    }
}
