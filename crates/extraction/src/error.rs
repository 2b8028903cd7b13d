//! Error types for the extraction crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while extracting metadata.
///
/// Only [`ExtractionError::Read`] can escape
/// [`Extractor::extract`](crate::Extractor::extract); every other kind is
/// absorbed at a level boundary and turned into a status flag or an omitted
/// field.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The file cannot be opened or stat'ed
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural failure inside a format
    #[error("Failed to parse {format} data: {message}")]
    Parse { format: String, message: String },

    /// An optional semantic field is absent
    #[error("Missing attribute: {0}")]
    AttributeMissing(String),

    /// A tabular row shorter than expected
    #[error("Malformed row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("Invalid date: {0}")]
    Time(#[from] catalog_common::TimeParseError),

    #[error("Invalid record: {0}")]
    Record(#[from] catalog_common::RecordError),

    #[error("GRIB2 error: {0}")]
    Grib2(#[from] grib2_parser::Grib2Error),

    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf_parser::NetCdfError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ExtractionError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractionError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        ExtractionError::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    /// True for failures that only mean "field absent".
    pub fn is_missing(&self) -> bool {
        matches!(self, ExtractionError::AttributeMissing(_))
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
