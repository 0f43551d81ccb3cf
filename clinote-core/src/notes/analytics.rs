use crate::types::*;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Computes [`NoteProfile`]s from segmented notes.
pub struct NoteAnalytics;

impl NoteAnalytics {
    /// Profile `note`, fingerprinting the `source` text it was parsed from.
    pub fn profile(note: &ClinicalNote, source: &str) -> NoteProfile {
        let mut kind_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_items = 0;
        let mut leaf_count = 0;
        let mut statement_like_leaves = 0;
        let mut max_depth = 0;
        let mut total_chars = 0;
        let mut section_labels = Vec::new();

        for (item, depth) in note.iter() {
            max_depth = max_depth.max(depth);
            if item.kind == ItemKind::Document {
                continue;
            }

            total_items += 1;
            *kind_counts.entry(item.kind.as_str().to_string()).or_insert(0) += 1;

            if item.kind == ItemKind::Section {
                if let Some(label) = &item.label {
                    section_labels.push(label.clone());
                }
            }

            if let Some(span) = item.span() {
                leaf_count += 1;
                total_chars += span.content().chars().count();
                if span.is_statement_like() {
                    statement_like_leaves += 1;
                }
            }
        }

        NoteProfile {
            created_at: Utc::now(),
            note_id: note.id,
            source_hash: Self::source_hash(source),
            total_items,
            section_count: section_labels.len(),
            leaf_count,
            statement_like_leaves,
            max_depth,
            total_chars,
            kind_counts,
            section_labels,
        }
    }

    /// SHA-256 of the note text, hex encoded.
    pub fn source_hash(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
