//! # Error Types

/// Errors from bpechipper operations.
///
/// Training itself never fails; these only cover rejected caller inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BpeError {
    /// The boundary marker is the empty string.
    #[error("boundary marker must not be empty")]
    EmptyBoundaryMarker,

    /// The boundary marker contains whitespace, and would be split away.
    #[error("boundary marker ({marker:?}) must not contain whitespace")]
    WhitespaceBoundaryMarker {
        /// The rejected marker.
        marker: String,
    },

    /// A vocabulary word does not end in the boundary marker.
    #[error("word ({word}) does not end with boundary marker ({marker:?})")]
    MissingBoundaryMarker {
        /// The offending word, rendered with space separated symbols.
        word: String,

        /// The expected boundary marker.
        marker: String,
    },

    /// A vocabulary word was given a zero count.
    #[error("word ({word}) has a zero count")]
    ZeroCount {
        /// The offending word, rendered with space separated symbols.
        word: String,
    },
}

/// Result type for bpechipper operations.
pub type BpeResult<T> = core::result::Result<T, BpeError>;
