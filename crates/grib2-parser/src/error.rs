//! Error types for GRIB2 scanning.

use thiserror::Error;

/// Result type for GRIB2 parser operations.
pub type Grib2Result<T> = Result<T, Grib2Error>;

#[derive(Error, Debug)]
pub enum Grib2Error {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The decoder rejected the message structure
    #[error("Invalid GRIB2 data: {0}")]
    InvalidFormat(String),
}
