use super::engine::{ParseRule, RuleContext, RuleMatch};
use super::line_cursor::{is_blank, next_line, require_line};
use crate::error::NoteResult;
use crate::types::{ItemKind, NoteItem};

/// Long unstructured prose.
///
/// Activates when the next non-blank line has at least `min_chars`
/// characters, then keeps absorbing following lines until a blank line
/// (which is consumed) or the end of the text. Lines are joined with no
/// separator.
#[derive(Debug, Clone)]
pub struct BlockTextRule {
    min_chars: usize,
    max_lines: usize,
}

impl BlockTextRule {
    pub fn new(min_chars: usize, max_lines: usize) -> Self {
        Self { min_chars, max_lines }
    }
}

impl ParseRule for BlockTextRule {
    fn try_update<'t>(&self, text: &'t str, ctx: &RuleContext<'_>) -> NoteResult<Option<RuleMatch<'t>>> {
        let first = require_line(text)?;
        if first.line.chars().count() < self.min_chars {
            return Ok(None);
        }

        let mut block = String::from(first.line);
        let mut rest = first.rest;
        let mut lines = 1;
        while lines < self.max_lines {
            let Some(next) = next_line(rest, true) else {
                break;
            };
            rest = next.rest;
            if is_blank(next.line) {
                break;
            }
            block.push_str(next.line);
            lines += 1;
        }

        Ok(Some(RuleMatch {
            item: NoteItem::leaf(ItemKind::Block, ctx.span(block)),
            rest,
        }))
    }

    fn name(&self) -> &'static str {
        "BlockText"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoteError;

    fn ctx_apply<'t>(rule: &BlockTextRule, text: &'t str) -> NoteResult<Option<RuleMatch<'t>>> {
        let classifier = |_: &str| false;
        let ctx = RuleContext {
            classifier: &classifier,
            body_rules: &[],
            max_items: 100,
        };
        rule.try_update(text, &ctx)
    }

    #[test]
    fn test_threshold_boundary() {
        let rule = BlockTextRule::new(45, 100);
        let short = "a".repeat(44);
        let exact = "b".repeat(45);

        assert!(ctx_apply(&rule, &short).unwrap().is_none());
        let matched = ctx_apply(&rule, &exact).unwrap().unwrap();
        assert_eq!(matched.item.text(), Some(exact.as_str()));
        assert_eq!(matched.item.kind, ItemKind::Block);
    }

    #[test]
    fn test_threshold_counts_characters_not_bytes() {
        let rule = BlockTextRule::new(45, 100);
        // 44 characters, more than 45 bytes
        let text = format!("{}é", "a".repeat(43));
        assert!(ctx_apply(&rule, &text).unwrap().is_none());
    }

    #[test]
    fn test_accumulates_until_blank_line() {
        let rule = BlockTextRule::new(10, 100);
        let matched = ctx_apply(&rule, "first long line\nsecond\nthird\n\nafter\n").unwrap().unwrap();
        assert_eq!(matched.item.text(), Some("first long linesecondthird"));
        assert_eq!(matched.rest, "after\n");
    }

    #[test]
    fn test_blank_line_right_after_first_line() {
        let rule = BlockTextRule::new(10, 100);
        let matched = ctx_apply(&rule, "first long line\n\nnext\n").unwrap().unwrap();
        assert_eq!(matched.item.text(), Some("first long line"));
        assert_eq!(matched.rest, "next\n");
    }

    #[test]
    fn test_whitespace_only_line_does_not_end_block() {
        let rule = BlockTextRule::new(45, 100);
        let text = "Patient presented with two days of intermittent chest pain\n   \ncontinued on aspirin\n";
        let matched = ctx_apply(&rule, text).unwrap().unwrap();
        assert_eq!(
            matched.item.text(),
            Some("Patient presented with two days of intermittent chest pain   continued on aspirin")
        );
        assert_eq!(matched.rest, "");
    }

    #[test]
    fn test_line_cap_ends_block() {
        let rule = BlockTextRule::new(5, 2);
        let matched = ctx_apply(&rule, "long line\ntwo\nthree\n").unwrap().unwrap();
        assert_eq!(matched.item.text(), Some("long linetwo"));
        assert_eq!(matched.rest, "three\n");
    }

    #[test]
    fn test_blank_text_is_caller_error() {
        let rule = BlockTextRule::new(45, 100);
        assert!(matches!(ctx_apply(&rule, "\n\n"), Err(NoteError::NoContent)));
    }
}
