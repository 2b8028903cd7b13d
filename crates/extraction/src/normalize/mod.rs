//! Coordinate and time normalization shared by every handler.

mod coords;
mod time_axis;

pub use coords::{clean_coordinates, is_valid_coordinate};
pub use time_axis::{num2date, parse_time_units, time_extent, TimeUnit, TimeUnits};
