//! Validators for trainer configuration options.
use crate::errors::{BpeError, BpeResult};
use crate::training::utility::is_separator;

/// Validates and returns the boundary marker.
///
/// The marker must be non-empty, and free of whitespace; corpus words are
/// split on whitespace, so such a marker could never be a word symbol.
pub fn try_boundary_marker(marker: &str) -> BpeResult<&str> {
    if marker.is_empty() {
        Err(BpeError::EmptyBoundaryMarker)
    } else if marker.chars().any(is_separator) {
        Err(BpeError::WhitespaceBoundaryMarker {
            marker: marker.to_string(),
        })
    } else {
        Ok(marker)
    }
}
