//! Error types for record construction.

use thiserror::Error;

/// Result type alias using RecordError.
pub type RecordResult<T> = Result<T, RecordError>;

/// Violations of the record schema invariants.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Phenomenon '{0}' has no attributes")]
    EmptyPhenomenon(String),

    #[error("Track latitude/longitude length mismatch: {lat} vs {lon}")]
    TrackLengthMismatch { lat: usize, lon: usize },

    #[error("Invalid extraction level: {0} (expected 1, 2 or 3)")]
    InvalidLevel(u8),
}
