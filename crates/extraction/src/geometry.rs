//! Spatial extent construction from coordinate sequences.

use catalog_common::{BoundingBox, SpatialExtent};
use tracing::debug;

use crate::normalize::clean_coordinates;

/// Most vertices kept in a display track.
pub const MAX_DISPLAY_POINTS: usize = 30;

/// Geometries derived from one set of coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Point or envelope, for the search index
    pub search: SpatialExtent,
    /// Decimated line string; only when both sequences have equal length
    pub display: Option<SpatialExtent>,
}

/// Build geometries from already cleaned latitude and longitude sequences.
///
/// Returns `None` if either sequence is empty.
pub fn build_geometry(lats: &[f64], lons: &[f64]) -> Option<Geometry> {
    let bbox = BoundingBox::from_coordinates(lons, lats)?;
    let search = if bbox.is_point() {
        SpatialExtent::Point {
            lon: bbox.min_x,
            lat: bbox.min_y,
        }
    } else {
        SpatialExtent::Envelope(bbox)
    };

    let display = (lats.len() == lons.len())
        .then(|| {
            SpatialExtent::track(
                decimate(lats, MAX_DISPLAY_POINTS),
                decimate(lons, MAX_DISPLAY_POINTS),
            )
            .ok()
        })
        .flatten();

    debug!(
        kind = search.kind(),
        samples = lats.len(),
        "Built search geometry"
    );
    Some(Geometry { search, display })
}

/// Clean raw coordinate values, then build geometries.
pub fn geometry_from_raw(raw_lats: &[f64], raw_lons: &[f64]) -> Option<Geometry> {
    build_geometry(&clean_coordinates(raw_lats), &clean_coordinates(raw_lons))
}

/// Evenly spaced subset of at most `max` values, first and last included.
pub fn decimate(values: &[f64], max: usize) -> Vec<f64> {
    if values.len() <= max {
        return values.to_vec();
    }
    if max < 2 {
        return values.iter().take(max).copied().collect();
    }
    let last = values.len() - 1;
    (0..max).map(|i| values[i * last / (max - 1)]).collect()
}
