//! Error types for thread_splitter

use thiserror::Error;

/// Result type for thread splitting operations
pub type Result<T> = std::result::Result<T, SplitError>;

/// Caller contract violations.
///
/// Content-shape problems (empty paragraphs, oversized code blocks, a single
/// token longer than the limit) are never errors: the engine always produces
/// some output for them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// Platform key not present in the profile table
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// Manual split offset outside `1..len`
    #[error("Split point {offset} out of bounds (text has {len} characters)")]
    SplitPointOutOfBounds { offset: usize, len: usize },

    /// Manual split offsets must be strictly increasing
    #[error("Split point {offset} at index {index} is not greater than previous split point {previous}")]
    SplitPointsNotIncreasing {
        index: usize,
        offset: usize,
        previous: usize,
    },
}
