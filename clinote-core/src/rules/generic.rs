use super::engine::{ParseRule, RuleContext, RuleMatch};
use super::line_cursor::require_line;
use crate::error::NoteResult;
use crate::types::{ItemKind, NoteItem};

/// Unconditional fallback: the next non-blank line, verbatim.
///
/// Always matches when a non-blank line exists, which is what guarantees the
/// assembler makes progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericRule;

impl ParseRule for GenericRule {
    fn try_update<'t>(&self, text: &'t str, ctx: &RuleContext<'_>) -> NoteResult<Option<RuleMatch<'t>>> {
        let next = require_line(text)?;
        Ok(Some(RuleMatch {
            item: NoteItem::leaf(ItemKind::Line, ctx.span(next.line)),
            rest: next.rest,
        }))
    }

    fn name(&self) -> &'static str {
        "Generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoteError;

    #[test]
    fn test_consumes_one_line_verbatim() {
        let classifier = |_: &str| false;
        let ctx = RuleContext {
            classifier: &classifier,
            body_rules: &[],
            max_items: 10,
        };
        let matched = GenericRule.try_update("\n  indented text \nnext", &ctx).unwrap().unwrap();
        assert_eq!(matched.item.text(), Some("  indented text "));
        assert_eq!(matched.item.label, None);
        assert_eq!(matched.rest, "next");
    }

    #[test]
    fn test_whitespace_only_line_kept() {
        let classifier = |_: &str| false;
        let ctx = RuleContext {
            classifier: &classifier,
            body_rules: &[],
            max_items: 10,
        };
        let matched = GenericRule.try_update("   \nb", &ctx).unwrap().unwrap();
        assert_eq!(matched.item.text(), Some("   "));
        assert_eq!(matched.rest, "b");
    }

    #[test]
    fn test_requires_content() {
        let classifier = |_: &str| false;
        let ctx = RuleContext {
            classifier: &classifier,
            body_rules: &[],
            max_items: 10,
        };
        assert!(matches!(GenericRule.try_update("\n\n", &ctx), Err(NoteError::NoContent)));
    }
}
