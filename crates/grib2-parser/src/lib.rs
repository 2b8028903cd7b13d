//! GRIB2 message scanning (WMO FM 92 GRIB Edition 2).
//!
//! Walks every message in a GRIB2 stream and exposes its identification
//! keys (discipline, parameter category and number, names and units) by
//! name. Section parsing is delegated to the `grib` crate.

pub mod error;
mod message;
pub mod tables;

pub use error::{Grib2Error, Grib2Result};
pub use message::{
    scan_file, scan_messages, GribMessage, KEY_DISCIPLINE, KEY_FIRST_SURFACE_TYPE, KEY_NAME,
    KEY_PARAMETER_CATEGORY, KEY_PARAMETER_NUMBER, KEY_SHORT_NAME, KEY_UNITS, SUPPORTED_KEYS,
};
pub use tables::{lookup_parameter, ParameterEntry};
