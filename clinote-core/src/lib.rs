// Clinote Core Library
//
// Segments semi-structured clinical note text into a tree of sections,
// key/value fields, numbered items, prose blocks and plain lines.
// Main interface for turning raw note text into a ClinicalNote.

pub mod types;
pub mod error;
pub mod classifier;
pub mod config;
pub mod rules;
pub mod notes;
pub mod processor;

// Re-export main types and functions for easy use
pub use types::*;
pub use error::{NoteError, NoteResult};
pub use classifier::{LexicalClassifier, NeverStatement, StatementClassifier};
pub use config::ParsingConfig;
pub use rules::NoteParser;
pub use notes::{NoteAnalytics, OutputFormat};
pub use processor::{NoteProcessor, StepProfiler};

/// Segment `text` with the default configuration and an injected classifier.
pub fn parse_clinical_note(text: &str, classifier: Box<dyn StatementClassifier + Send + Sync>) -> NoteResult<ClinicalNote> {
    NoteParser::new_with_classifier(ParsingConfig::default(), classifier)?.parse(text)
}
