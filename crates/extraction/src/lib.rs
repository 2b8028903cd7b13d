//! Scientific file metadata extraction.
//!
//! Extracts catalogue metadata from heterogeneous scientific data files at
//! three levels of completeness:
//!
//! 1. file identity and size
//! 2. phenomena (scientific variables with their attributes)
//! 3. temporal and spatial extents
//!
//! # Architecture
//!
//! - [`metadata`] detects the file type from extension or content
//! - [`handlers`] holds one handler per format behind [`FormatHandler`]
//! - [`normalize`] and [`geometry`] turn raw coordinates and dates into
//!   canonical extents
//! - [`Extractor`] drives the levels and absorbs handler failures

pub mod config;
pub mod error;
pub mod geometry;
pub mod handlers;
pub mod metadata;
pub mod nasa_ames;
pub mod normalize;
pub mod phenomena;
mod extractor;

// Re-exports
pub use config::ExtractionConfig;
pub use error::{ExtractionError, Result};
pub use extractor::Extractor;
pub use handlers::{FormatHandler, Handler};
pub use metadata::{detect, detect_file_type, FileType};
