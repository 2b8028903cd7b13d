//! Metadata record schema.
//!
//! A [`MetadataRecord`] is assembled once per extraction call and handed to
//! the indexing sink. Constructors enforce the schema invariants so that no
//! handler can emit an empty phenomenon or an inverted time range.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{RecordError, RecordResult};
use crate::time::to_iso;

/// Extraction completeness tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    /// File identity and size
    One = 1,
    /// Level 1 plus phenomena
    Two = 2,
    /// Level 2 plus temporal and spatial extents
    Three = 3,
}

impl Level {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Level {
    type Error = RecordError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::One),
            2 => Ok(Level::Two),
            3 => Ok(Level::Three),
            other => Err(RecordError::InvalidLevel(other)),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Whether extraction beyond level 1 completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadStatus {
    Successful,
    #[serde(rename = "Read Error")]
    ReadError,
}

impl fmt::Display for ReadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadStatus::Successful => f.write_str("Successful"),
            ReadStatus::ReadError => f.write_str("Read Error"),
        }
    }
}

/// File identity. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    path: PathBuf,
    size: u64,
    format: String,
    handler: String,
    read_status: ReadStatus,
}

impl FileRecord {
    pub fn new(
        path: impl Into<PathBuf>,
        size: u64,
        format: impl Into<String>,
        handler: impl Into<String>,
        read_status: ReadStatus,
    ) -> Self {
        Self {
            path: path.into(),
            size,
            format: format.into(),
            handler: handler.into(),
            read_status,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn read_status(&self) -> ReadStatus {
        self.read_status
    }

    /// File name without its directory.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory holding the file.
    pub fn directory(&self) -> String {
        self.path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Lower-cased extension, empty when the file has none.
    pub fn file_type(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }
}

/// One `{name, value}` pair describing a phenomenon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhenomenonAttribute {
    pub name: String,
    pub value: String,
}

impl PhenomenonAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named scientific variable with its descriptive attributes.
///
/// Attribute order is insertion order and names may repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PhenomenonFields")]
pub struct Phenomenon {
    id: String,
    attributes: Vec<PhenomenonAttribute>,
}

#[derive(Deserialize)]
struct PhenomenonFields {
    id: String,
    attributes: Vec<PhenomenonAttribute>,
}

impl TryFrom<PhenomenonFields> for Phenomenon {
    type Error = RecordError;

    fn try_from(fields: PhenomenonFields) -> Result<Self, Self::Error> {
        Phenomenon::new(fields.id, fields.attributes)
    }
}

impl Phenomenon {
    pub fn new(id: impl Into<String>, attributes: Vec<PhenomenonAttribute>) -> RecordResult<Self> {
        let id = id.into();
        if attributes.is_empty() {
            return Err(RecordError::EmptyPhenomenon(id));
        }
        Ok(Self { id, attributes })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attributes(&self) -> &[PhenomenonAttribute] {
        &self.attributes
    }

    /// First value recorded under `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// Time covered by a file's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalExtent {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TemporalExtent {
    /// A single instant, both bounds equal.
    pub fn instant(at: NaiveDateTime) -> Self {
        Self { start: at, end: at }
    }

    /// Extent spanning two bounds given in either order.
    pub fn spanning(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_time(&self) -> String {
        to_iso(&self.start)
    }

    pub fn end_time(&self) -> String {
        to_iso(&self.end)
    }
}

/// Spatial coverage of a file's data.
#[derive(Debug, Clone, PartialEq)]
pub enum SpatialExtent {
    /// Every observation at one location
    Point { lon: f64, lat: f64 },
    /// Axis-aligned longitude/latitude rectangle
    Envelope(BoundingBox),
    /// Ordered path of samples; both sequences have equal length
    Track { lat: Vec<f64>, lon: Vec<f64> },
}

impl SpatialExtent {
    pub fn track(lat: Vec<f64>, lon: Vec<f64>) -> RecordResult<Self> {
        if lat.len() != lon.len() {
            return Err(RecordError::TrackLengthMismatch {
                lat: lat.len(),
                lon: lon.len(),
            });
        }
        Ok(SpatialExtent::Track { lat, lon })
    }

    /// Geometry type tag used by the search index.
    pub fn kind(&self) -> &'static str {
        match self {
            SpatialExtent::Point { .. } => "point",
            SpatialExtent::Envelope(_) => "envelope",
            SpatialExtent::Track { .. } => "linestring",
        }
    }
}

/// Everything extracted from one file.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    pub file: FileRecord,
    pub phenomena: Vec<Phenomenon>,
    pub temporal: Option<TemporalExtent>,
    pub spatial: Option<SpatialExtent>,
    pub level: Level,
}

impl MetadataRecord {
    /// A level-1 record: identity only.
    pub fn identity(file: FileRecord) -> Self {
        Self {
            file,
            phenomena: Vec::new(),
            temporal: None,
            spatial: None,
            level: Level::One,
        }
    }

    pub fn read_status(&self) -> ReadStatus {
        self.file.read_status()
    }
}
