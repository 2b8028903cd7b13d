//! Extraction configuration and fixed vocabularies.
//!
//! Defines the tunables a caller may set and the marker names the format
//! handlers recognise.

use catalog_common::Level;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, Result};

/// Attribute values longer than this are dropped by the columnar handler.
pub const DEFAULT_MAX_ATTRIBUTE_LENGTH: usize = 300;

/// Name of the synthetic attribute carrying the variable identifier.
pub const VAR_ID: &str = "var_id";

/// BADC-CSV row vocabulary.
pub mod badc {
    /// First-column value that ends the metadata header
    pub const DATA_SENTINEL: &str = "data";
    /// Second-column value marking a file-global row
    pub const GLOBAL_MARKER: &str = "G";
    /// Global row holding the file date
    pub const DATE_VALID: &str = "date_valid";
    /// Global row holding the file location
    pub const LOCATION: &str = "location";
    /// Location value meaning the whole globe
    pub const GLOBAL_LOCATION: &str = "global";
    /// Field names whose 4th column carries units
    pub const UNIT_BEARING_FIELDS: [&str; 2] = ["standard_name", "long_name"];
    /// Name of the synthesized units attribute
    pub const UNITS: &str = "units";
    /// First-line marker distinguishing BADC-CSV from plain CSV
    pub const SIGNATURE: &str = "BADC-CSV";
}

/// GRIB2 message keys.
pub mod grib {
    use grib2_parser::{
        KEY_DISCIPLINE, KEY_NAME, KEY_PARAMETER_CATEGORY, KEY_PARAMETER_NUMBER, KEY_SHORT_NAME,
        KEY_UNITS,
    };

    /// Keys read from every message, in order. Reading stops at the first
    /// key a message does not define.
    pub const PHENOMENON_KEYS: [&str; 6] = [
        KEY_DISCIPLINE,
        KEY_PARAMETER_CATEGORY,
        KEY_PARAMETER_NUMBER,
        KEY_SHORT_NAME,
        KEY_NAME,
        KEY_UNITS,
    ];

    /// Constant `var_id` value; messages carry no variable name.
    pub const VAR_ID_PLACEHOLDER: &str = "None";
}

/// CF standard names used for semantic variable discovery.
pub mod standard_names {
    pub const STANDARD_NAME: &str = "standard_name";
    pub const UNITS: &str = "units";
    pub const CALENDAR: &str = "calendar";
    pub const TIME: &str = "time";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
}

/// Per-call extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExtractionConfig {
    /// Requested completeness tier
    pub level: Level,
    /// Longest attribute value kept by the columnar handler
    pub max_attribute_length: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            level: Level::One,
            max_attribute_length: DEFAULT_MAX_ATTRIBUTE_LENGTH,
        }
    }
}

impl ExtractionConfig {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_max_attribute_length(mut self, max: usize) -> Self {
        self.max_attribute_length = max;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attribute_length == 0 {
            return Err(ExtractionError::InvalidConfig(
                "max-attribute-length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
