use thiserror::Error;

/// Errors raised by the segmentation core.
///
/// Ordinary "this rule does not match" outcomes are never errors; they are
/// reported as `None` by the rules and the next alternative is tried.
#[derive(Debug, Error)]
pub enum NoteError {
    /// A non-blank line was requested but only blank lines (or nothing) remain
    #[error("no non-blank line remains in the input")]
    NoContent,

    /// The item cap was hit before the input was consumed
    #[error("item limit of {limit} exceeded while segmenting note")]
    IterationLimit { limit: usize },

    /// A rule pattern built from configuration failed to compile
    #[error("invalid rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Configuration values outside their valid domain
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type NoteResult<T> = std::result::Result<T, NoteError>;
