use crate::classifier::{LexicalClassifier, NeverStatement, StatementClassifier};
use crate::config::ParsingConfig;
use crate::error::{NoteError, NoteResult};
use crate::types::*;
use tracing::{debug, trace};

use super::block_text::BlockTextRule;
use super::generic::GenericRule;
use super::header_content::HeaderContentRule;
use super::key_value::KeyValueRule;
use super::line_cursor::has_content;
use super::numbered_item::NumberedItemRule;

/// A successful rule application: the produced item and the unconsumed text.
#[derive(Debug, Clone)]
pub struct RuleMatch<'t> {
    pub item: NoteItem,
    pub rest: &'t str,
}

/// Everything a rule needs besides the text, passed top-down.
pub struct RuleContext<'r> {
    pub classifier: &'r dyn StatementClassifier,
    /// Rules a section body is segmented with, in priority order
    pub body_rules: &'r [NoteRule],
    pub max_items: usize,
}

impl RuleContext<'_> {
    pub fn span(&self, content: impl Into<String>) -> TextSpan {
        TextSpan::new(content, self.classifier)
    }
}

/// Shared "try to consume a prefix" capability.
///
/// `Ok(None)` means no match and nothing consumed. `Err(NoteError::NoContent)`
/// means the caller handed over text without a non-blank line.
pub trait ParseRule {
    fn try_update<'t>(&self, text: &'t str, ctx: &RuleContext<'_>) -> NoteResult<Option<RuleMatch<'t>>>;
    fn name(&self) -> &'static str;
}

/// The closed set of segmentation rules.
#[derive(Debug, Clone)]
pub enum NoteRule {
    HeaderContent(HeaderContentRule),
    KeyValue(KeyValueRule),
    NumberedItem(NumberedItemRule),
    BlockText(BlockTextRule),
    Generic(GenericRule),
}

impl ParseRule for NoteRule {
    fn try_update<'t>(&self, text: &'t str, ctx: &RuleContext<'_>) -> NoteResult<Option<RuleMatch<'t>>> {
        match self {
            NoteRule::HeaderContent(rule) => rule.try_update(text, ctx),
            NoteRule::KeyValue(rule) => rule.try_update(text, ctx),
            NoteRule::NumberedItem(rule) => rule.try_update(text, ctx),
            NoteRule::BlockText(rule) => rule.try_update(text, ctx),
            NoteRule::Generic(rule) => rule.try_update(text, ctx),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            NoteRule::HeaderContent(rule) => rule.name(),
            NoteRule::KeyValue(rule) => rule.name(),
            NoteRule::NumberedItem(rule) => rule.name(),
            NoteRule::BlockText(rule) => rule.name(),
            NoteRule::Generic(rule) => rule.name(),
        }
    }
}

impl NoteRule {
    /// Leaf rules in their fixed priority order: KeyValue, NumberedItem,
    /// BlockText, Generic. Generic always matches a non-blank line.
    pub fn leaf_rules(config: &ParsingConfig) -> NoteResult<Vec<NoteRule>> {
        Ok(vec![
            NoteRule::KeyValue(KeyValueRule::new(config.segmentation.max_label_tokens)?),
            NoteRule::NumberedItem(NumberedItemRule::new()?),
            NoteRule::BlockText(BlockTextRule::new(
                config.segmentation.block_min_chars,
                config.limits.max_block_lines,
            )),
            NoteRule::Generic(GenericRule),
        ])
    }

    /// Top-level rules: HeaderContent first, then the leaf rules.
    pub fn document_rules(config: &ParsingConfig) -> NoteResult<Vec<NoteRule>> {
        let mut rules = vec![NoteRule::HeaderContent(HeaderContentRule::new(
            config.segmentation.max_label_tokens,
        )?)];
        rules.extend(Self::leaf_rules(config)?);
        Ok(rules)
    }
}

/// Try `rules` in order; the first match wins.
pub fn first_match<'t>(
    rules: &[NoteRule],
    text: &'t str,
    ctx: &RuleContext<'_>,
) -> NoteResult<Option<RuleMatch<'t>>> {
    for rule in rules {
        if let Some(matched) = rule.try_update(text, ctx)? {
            debug!(
                rule = rule.name(),
                kind = matched.item.kind.as_str(),
                label = matched.item.label.as_deref().unwrap_or(""),
                "rule matched"
            );
            trace!(consumed = text.len() - matched.rest.len(), "advanced cursor");
            return Ok(Some(matched));
        }
    }
    Ok(None)
}

/// Top-level note assembler.
///
/// Repeatedly applies HeaderContent and then the leaf rules until no
/// non-blank line remains. Every accepted match consumes at least one line,
/// so the loop always terminates.
pub struct NoteParser {
    config: ParsingConfig,
    classifier: Box<dyn StatementClassifier + Send + Sync>,
    document_rules: Vec<NoteRule>,
    body_rules: Vec<NoteRule>,
}

impl NoteParser {
    /// Parser with the built-in lexical classifier
    pub fn new(config: ParsingConfig) -> NoteResult<Self> {
        Self::new_with_classifier(config, Box::new(LexicalClassifier::new()))
    }

    /// Parser with an injected statement classifier
    pub fn new_with_classifier(
        config: ParsingConfig,
        classifier: Box<dyn StatementClassifier + Send + Sync>,
    ) -> NoteResult<Self> {
        config.validate()?;
        let document_rules = NoteRule::document_rules(&config)?;
        let body_rules = NoteRule::leaf_rules(&config)?;
        Ok(Self {
            config,
            classifier,
            document_rules,
            body_rules,
        })
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn parse(&self, text: &str) -> NoteResult<ClinicalNote> {
        let classifier: &dyn StatementClassifier = if self.config.classify_spans {
            self.classifier.as_ref()
        } else {
            &NeverStatement
        };
        let ctx = RuleContext {
            classifier,
            body_rules: &self.body_rules,
            max_items: self.config.limits.max_items,
        };

        let mut items = Vec::new();
        let mut rest = text;
        while has_content(rest) {
            if items.len() >= ctx.max_items {
                return Err(NoteError::IterationLimit {
                    limit: ctx.max_items,
                });
            }
            let matched = first_match(&self.document_rules, rest, &ctx)?.ok_or(NoteError::NoContent)?;
            items.push(matched.item);
            rest = matched.rest;
        }

        debug!(items = items.len(), "note assembled");
        Ok(ClinicalNote::new(items))
    }
}

impl Default for NoteParser {
    fn default() -> Self {
        Self::new(ParsingConfig::default()).expect("default parsing config is valid")
    }
}
