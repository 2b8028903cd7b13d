//! Coordinate cleaning.

/// A coordinate is kept unless it is exactly `0.0` (a misconfigured fill
/// value) or not a finite number.
pub fn is_valid_coordinate(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

/// Drop invalid coordinates, preserving the order of the rest.
pub fn clean_coordinates(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .copied()
        .filter(|v| is_valid_coordinate(*v))
        .collect()
}
