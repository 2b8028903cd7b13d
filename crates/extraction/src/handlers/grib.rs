//! GRIB message-stream handler.

use std::path::Path;

use catalog_common::{Phenomenon, PhenomenonAttribute, RecordResult};
use grib2_parser::{scan_file, GribMessage};
use tracing::debug;

use super::FormatHandler;
use crate::config::{grib, ExtractionConfig, VAR_ID};
use crate::error::Result;
use crate::phenomena::AttributeDedup;

pub const GRIB_FORMAT: &str = "GRIB";

/// Per-message key access with definedness.
pub trait MessageKeys {
    /// Value of `key`, `None` when the message does not define it.
    fn key(&self, key: &str) -> Option<String>;
}

impl MessageKeys for GribMessage {
    fn key(&self, key: &str) -> Option<String> {
        GribMessage::key(self, key)
    }
}

/// One phenomenon per distinct ordered key list.
///
/// Keys are read in order until the first undefined one; a constant
/// `var_id` pair always closes the list and takes part in the comparison.
/// A phenomenon is identified by the 1-based position of the first message
/// that produced it.
pub fn grib_phenomena<M: MessageKeys>(messages: &[M]) -> RecordResult<Vec<Phenomenon>> {
    let mut dedup = AttributeDedup::new();
    let mut phenomena = Vec::new();

    for (position, message) in messages.iter().enumerate() {
        let mut attributes: Vec<PhenomenonAttribute> = grib::PHENOMENON_KEYS
            .iter()
            .map_while(|key| message.key(key).map(|v| PhenomenonAttribute::new(*key, v)))
            .collect();
        attributes.push(PhenomenonAttribute::new(VAR_ID, grib::VAR_ID_PLACEHOLDER));

        if dedup.insert(&attributes) {
            phenomena.push(Phenomenon::new((position + 1).to_string(), attributes)?);
        }
    }

    debug!(
        messages = messages.len(),
        phenomena = phenomena.len(),
        "Deduplicated GRIB phenomena"
    );
    Ok(phenomena)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GribHandler;

impl FormatHandler for GribHandler {
    fn handler_id(&self) -> &'static str {
        GRIB_FORMAT
    }

    fn sniff(&self, _path: &Path) -> Result<String> {
        Ok(GRIB_FORMAT.to_string())
    }

    fn phenomena(&self, path: &Path, _config: &ExtractionConfig) -> Result<Vec<Phenomenon>> {
        let messages = scan_file(path)?;
        Ok(grib_phenomena(&messages)?)
    }
}
