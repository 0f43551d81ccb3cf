pub mod analytics;
pub mod serialization;
pub mod traversal;
// Re-export for easy access
pub use analytics::NoteAnalytics;
pub use serialization::OutputFormat;
pub use traversal::PreOrder;
