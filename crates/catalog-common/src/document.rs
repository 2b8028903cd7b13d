//! Index document rendering.
//!
//! The indexing sink consumes JSON shaped as
//! `{info, phenomena, temporal, spatial}`; absent parts are left out rather
//! than emitted as nulls.

use serde::Serialize;

use crate::record::{Level, MetadataRecord, Phenomenon, ReadStatus, SpatialExtent};

#[derive(Debug, Clone, Serialize)]
pub struct IndexDocument {
    pub info: InfoDocument,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phenomena: Vec<Phenomenon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial: Option<SpatialDocument>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoDocument {
    pub name: String,
    pub directory: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub file_type: String,
    pub format: String,
    pub handler: String,
    pub read_status: ReadStatus,
    pub level: Level,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeRangeDocument {
    pub gte: String,
    pub lte: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemporalDocument {
    pub time_range: TimeRangeDocument,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpatialDocument {
    pub coordinates: GeometryDocument,
}

/// A geometry in the search index's `{type, coordinates}` shape.
#[derive(Debug, Clone, Serialize)]
pub struct GeometryDocument {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub coordinates: serde_json::Value,
}

impl From<&SpatialExtent> for GeometryDocument {
    fn from(extent: &SpatialExtent) -> Self {
        let coordinates = match extent {
            SpatialExtent::Point { lon, lat } => serde_json::json!([lon, lat]),
            SpatialExtent::Envelope(bbox) => serde_json::json!(bbox.envelope_corners()),
            SpatialExtent::Track { lat, lon } => serde_json::json!(lon
                .iter()
                .zip(lat)
                .map(|(x, y)| [*x, *y])
                .collect::<Vec<_>>()),
        };
        Self {
            kind: extent.kind(),
            coordinates,
        }
    }
}

impl From<&MetadataRecord> for IndexDocument {
    fn from(record: &MetadataRecord) -> Self {
        let file = &record.file;
        Self {
            info: InfoDocument {
                name: file.name(),
                directory: file.directory(),
                size: file.size(),
                file_type: file.file_type(),
                format: file.format().to_string(),
                handler: file.handler().to_string(),
                read_status: file.read_status(),
                level: record.level,
            },
            phenomena: record.phenomena.clone(),
            temporal: record.temporal.map(|t| {
                let (start, end) = (t.start_time(), t.end_time());
                TemporalDocument {
                    time_range: TimeRangeDocument {
                        gte: start.clone(),
                        lte: end.clone(),
                    },
                    start_time: start,
                    end_time: end,
                }
            }),
            spatial: record.spatial.as_ref().map(|s| SpatialDocument {
                coordinates: s.into(),
            }),
        }
    }
}

impl IndexDocument {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
