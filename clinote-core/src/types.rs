use crate::classifier::StatementClassifier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub type NoteId = Uuid;

/// The schema version stamped on every serialized note.
/// Bump this when the output shape changes.
pub const SCHEMA_VERSION: &str = "0.1.0";

// ===== LEAF DATA =====

/// A piece of note text plus its cached statement-like flag.
///
/// The classifier runs exactly once, inside [`TextSpan::new`]. Two spans with
/// the same text are still classified independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    content: String,
    is_statement_like: bool,
}

impl TextSpan {
    pub fn new(content: impl Into<String>, classifier: &dyn StatementClassifier) -> Self {
        let content = content.into();
        let is_statement_like = classifier.is_statement_like(&content);
        Self {
            content,
            is_statement_like,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_statement_like(&self) -> bool {
        self.is_statement_like
    }
}

// ===== TREE NODES =====

/// Which rule produced an item. Informational only; parsing never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    Document,
    Section,
    KeyValue,
    ListItem,
    Block,
    Line,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Document => "Document",
            ItemKind::Section => "Section",
            ItemKind::KeyValue => "KeyValue",
            ItemKind::ListItem => "ListItem",
            ItemKind::Block => "Block",
            ItemKind::Line => "Line",
        }
    }
}

/// Payload of a [`NoteItem`]: a single span or an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    Span(TextSpan),
    Items(Vec<NoteItem>),
}

/// A node of the note tree. Children are owned; there are no back-references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteItem {
    pub kind: ItemKind,
    /// Header or key label, right-trimmed: `"Diagnosis :"` gives `"Diagnosis"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub payload: Payload,
}

impl NoteItem {
    /// Unlabeled leaf item.
    pub fn leaf(kind: ItemKind, span: TextSpan) -> Self {
        Self {
            kind,
            label: None,
            payload: Payload::Span(span),
        }
    }

    /// Labeled leaf item (`key: value`).
    pub fn labeled_leaf(kind: ItemKind, label: impl Into<String>, span: TextSpan) -> Self {
        Self {
            kind,
            label: Some(label.into()),
            payload: Payload::Span(span),
        }
    }

    /// Item holding an ordered list of children.
    pub fn list(kind: ItemKind, label: Option<String>, children: Vec<NoteItem>) -> Self {
        Self {
            kind,
            label,
            payload: Payload::Items(children),
        }
    }

    /// Append a child, promoting a span payload to a list first.
    ///
    /// The promoted span becomes an unlabeled leaf of the same kind and stays
    /// first, so reading order is preserved.
    pub fn append(&mut self, child: NoteItem) {
        if let Payload::Items(children) = &mut self.payload {
            children.push(child);
            return;
        }
        let previous = std::mem::replace(&mut self.payload, Payload::Items(Vec::new()));
        if let Payload::Span(span) = previous {
            self.payload = Payload::Items(vec![NoteItem::leaf(self.kind, span), child]);
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.payload, Payload::Span(_))
    }

    pub fn span(&self) -> Option<&TextSpan> {
        match &self.payload {
            Payload::Span(span) => Some(span),
            Payload::Items(_) => None,
        }
    }

    /// Children in document order; empty for leaves.
    pub fn children(&self) -> &[NoteItem] {
        match &self.payload {
            Payload::Span(_) => &[],
            Payload::Items(children) => children,
        }
    }

    /// Text of a leaf, or `None` for list items.
    pub fn text(&self) -> Option<&str> {
        self.span().map(TextSpan::content)
    }
}

// ===== DOCUMENT =====

/// A segmented note: one unlabeled root item holding the top-level items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalNote {
    pub id: NoteId,
    root: NoteItem,
}

impl ClinicalNote {
    pub fn new(items: Vec<NoteItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            root: NoteItem::list(ItemKind::Document, None, items),
        }
    }

    pub fn root(&self) -> &NoteItem {
        &self.root
    }

    /// Top-level items in document order.
    pub fn items(&self) -> &[NoteItem] {
        self.root.children()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

// ===== PROFILE =====

/// Mechanically computed summary of a note's shape.
/// Deterministic for a given input except `created_at` and `note_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteProfile {
    pub created_at: DateTime<Utc>,
    pub note_id: NoteId,
    /// SHA-256 of the source text, hex encoded
    pub source_hash: String,
    pub total_items: usize,
    pub section_count: usize,
    pub leaf_count: usize,
    pub statement_like_leaves: usize,
    pub max_depth: usize,
    pub total_chars: usize,
    pub kind_counts: BTreeMap<String, usize>,
    pub section_labels: Vec<String>,
}

/// Note plus its profile, as returned by the processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedNote {
    pub note: ClinicalNote,
    pub profile: NoteProfile,
}
