//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees.
///
/// `x` is longitude and `y` is latitude. Boxes built from observed
/// coordinates may be degenerate (zero width or height).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The whole globe.
    pub fn global() -> Self {
        Self::new(-180.0, -90.0, 180.0, 90.0)
    }

    /// Smallest box covering every longitude and latitude given.
    ///
    /// The two sequences are reduced independently, so they may differ in
    /// length (e.g. the axes of a regular grid). Returns `None` when either
    /// side is empty.
    pub fn from_coordinates(lons: &[f64], lats: &[f64]) -> Option<Self> {
        let (min_x, max_x) = min_max(lons)?;
        let (min_y, max_y) = min_max(lats)?;
        Some(Self::new(min_x, min_y, max_x, max_y))
    }

    /// Envelope corners in search-index order: upper-left then lower-right,
    /// each as `[lon, lat]`.
    pub fn envelope_corners(&self) -> [[f64; 2]; 2] {
        [[self.min_x, self.max_y], [self.max_x, self.min_y]]
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when the box has collapsed onto a single location.
    pub fn is_point(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_envelope_corners() {
        let corners = BoundingBox::global().envelope_corners();
        assert_eq!(corners, [[-180.0, 90.0], [180.0, -90.0]]);
    }

    #[test]
    fn test_from_coordinates() {
        let bbox = BoundingBox::from_coordinates(&[10.0, -5.0, 3.0], &[50.0, 52.5]).unwrap();
        assert_eq!(bbox.min_x, -5.0);
        assert_eq!(bbox.max_x, 10.0);
        assert_eq!(bbox.min_y, 50.0);
        assert_eq!(bbox.max_y, 52.5);
        assert!(!bbox.is_point());
    }

    #[test]
    fn test_from_coordinates_empty_side() {
        assert!(BoundingBox::from_coordinates(&[], &[1.0]).is_none());
        assert!(BoundingBox::from_coordinates(&[1.0], &[]).is_none());
    }
}
