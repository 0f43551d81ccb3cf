// All segmentation functionality lives in clinote-core.
// This CLI is a thin wrapper around the core library.

pub use clinote_core::*;
