// Segmentation rules - each file implements one rule, engine.rs drives them:
// - engine.rs: ParseRule trait, NoteRule dispatch, NoteParser (top-level assembler)
// - line_cursor.rs: line splitting over the remaining text
// - header_content.rs: section header + flat section body
// - key_value.rs: `label: value` lines
// - numbered_item.rs: `1. item` lines
// - block_text.rs: long prose blocks
// - generic.rs: one-line fallback

pub mod engine;
pub mod line_cursor;
pub mod header_content;
pub mod key_value;
pub mod numbered_item;
pub mod block_text;
pub mod generic;

pub use engine::*;
