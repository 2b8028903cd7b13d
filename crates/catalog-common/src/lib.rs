//! Common types and utilities shared across the catalog workspace.
//!
//! Everything a format handler produces ends up in one of the record types
//! defined here, and everything the indexing sink consumes is rendered from
//! them by [`document`].

pub mod bbox;
pub mod document;
pub mod error;
pub mod record;
pub mod time;

pub use bbox::BoundingBox;
pub use document::IndexDocument;
pub use error::{RecordError, RecordResult};
pub use record::{
    FileRecord, Level, MetadataRecord, Phenomenon, PhenomenonAttribute, ReadStatus,
    SpatialExtent, TemporalExtent,
};
pub use time::{date_to_iso, parse_datetime, to_iso, TimeParseError};
