//! Per-message key access over a GRIB2 stream.
//!
//! Decoding of grid values is left to the `grib` crate; this module only
//! reads the identification keys needed to describe each message.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{Grib2Error, Grib2Result};
use crate::tables::{lookup_parameter, ParameterEntry};

pub const KEY_DISCIPLINE: &str = "discipline";
pub const KEY_PARAMETER_CATEGORY: &str = "parameterCategory";
pub const KEY_PARAMETER_NUMBER: &str = "parameterNumber";
pub const KEY_SHORT_NAME: &str = "shortName";
pub const KEY_NAME: &str = "name";
pub const KEY_UNITS: &str = "units";
pub const KEY_FIRST_SURFACE_TYPE: &str = "typeOfFirstFixedSurface";

/// Every key name [`GribMessage::key`] understands.
pub const SUPPORTED_KEYS: &[&str] = &[
    KEY_DISCIPLINE,
    KEY_PARAMETER_CATEGORY,
    KEY_PARAMETER_NUMBER,
    KEY_SHORT_NAME,
    KEY_NAME,
    KEY_UNITS,
    KEY_FIRST_SURFACE_TYPE,
];

/// Identification keys of one GRIB2 (sub)message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GribMessage {
    /// 1-based position in the stream
    pub index: usize,
    pub discipline: u8,
    pub parameter_category: Option<u8>,
    pub parameter_number: Option<u8>,
    pub first_surface_type: Option<u8>,
}

impl GribMessage {
    fn parameter(&self) -> Option<ParameterEntry> {
        lookup_parameter(
            self.discipline,
            self.parameter_category?,
            self.parameter_number?,
        )
    }

    /// Value of a named key, `None` when the key is unknown or undefined for
    /// this message.
    pub fn key(&self, key: &str) -> Option<String> {
        match key {
            KEY_DISCIPLINE => Some(self.discipline.to_string()),
            KEY_PARAMETER_CATEGORY => self.parameter_category.map(|v| v.to_string()),
            KEY_PARAMETER_NUMBER => self.parameter_number.map(|v| v.to_string()),
            KEY_SHORT_NAME => self.parameter().map(|p| p.short_name.to_string()),
            KEY_NAME => self.parameter().map(|p| p.name.to_string()),
            KEY_UNITS => self.parameter().map(|p| p.units.to_string()),
            // 255 is the WMO "missing" code
            KEY_FIRST_SURFACE_TYPE => self
                .first_surface_type
                .filter(|t| *t != 255)
                .map(|t| t.to_string()),
            _ => None,
        }
    }
}

/// Read the identification keys of every message in a GRIB2 stream.
pub fn scan_messages<R: Read + Seek>(reader: R) -> Grib2Result<Vec<GribMessage>> {
    let grib_file =
        grib::from_reader(reader).map_err(|e| Grib2Error::InvalidFormat(e.to_string()))?;

    let mut messages = Vec::new();
    for ((section, submessage), submsg) in grib_file.iter() {
        let prod_def = submsg.prod_def();
        let message = GribMessage {
            index: messages.len() + 1,
            discipline: submsg.indicator().discipline,
            parameter_category: prod_def.parameter_category(),
            parameter_number: prod_def.parameter_number(),
            first_surface_type: prod_def
                .fixed_surfaces()
                .map(|(first, _)| first.surface_type),
        };
        trace!(
            section = section,
            submessage = submessage,
            discipline = message.discipline,
            category = ?message.parameter_category,
            number = ?message.parameter_number,
            "Scanned GRIB2 message"
        );
        messages.push(message);
    }

    Ok(messages)
}

/// Open and scan a GRIB2 file.
pub fn scan_file(path: impl AsRef<Path>) -> Grib2Result<Vec<GribMessage>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let messages = scan_messages(BufReader::new(file))?;
    debug!(path = %path.display(), count = messages.len(), "Scanned GRIB2 file");
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(category: Option<u8>, number: Option<u8>) -> GribMessage {
        GribMessage {
            index: 1,
            discipline: 0,
            parameter_category: category,
            parameter_number: number,
            first_surface_type: Some(103),
        }
    }

    #[test]
    fn test_numeric_keys() {
        let msg = message(Some(0), Some(0));
        assert_eq!(msg.key(KEY_DISCIPLINE).as_deref(), Some("0"));
        assert_eq!(msg.key(KEY_PARAMETER_CATEGORY).as_deref(), Some("0"));
        assert_eq!(msg.key(KEY_PARAMETER_NUMBER).as_deref(), Some("0"));
        assert_eq!(msg.key(KEY_FIRST_SURFACE_TYPE).as_deref(), Some("103"));
    }

    #[test]
    fn test_table_keys() {
        let msg = message(Some(2), Some(2));
        assert_eq!(msg.key(KEY_SHORT_NAME).as_deref(), Some("UGRD"));
        assert_eq!(msg.key(KEY_NAME).as_deref(), Some("u-component of wind"));
        assert_eq!(msg.key(KEY_UNITS).as_deref(), Some("m s-1"));
    }

    #[test]
    fn test_undefined_keys() {
        let msg = message(None, None);
        assert!(msg.key(KEY_PARAMETER_CATEGORY).is_none());
        assert!(msg.key(KEY_SHORT_NAME).is_none());
        assert!(msg.key("notAKey").is_none());

        let unknown = message(Some(0), Some(250));
        assert_eq!(unknown.key(KEY_PARAMETER_NUMBER).as_deref(), Some("250"));
        assert!(unknown.key(KEY_NAME).is_none());
    }

    #[test]
    fn test_missing_surface_type() {
        let mut msg = message(Some(0), Some(0));
        msg.first_surface_type = Some(255);
        assert!(msg.key(KEY_FIRST_SURFACE_TYPE).is_none());
    }
}
