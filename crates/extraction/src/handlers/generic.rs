//! Fallback for unrecognised files: identity only.

use std::path::Path;

use catalog_common::Phenomenon;

use super::FormatHandler;
use crate::config::ExtractionConfig;
use crate::error::{ExtractionError, Result};
use crate::metadata::extension_tag;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenericHandler;

impl FormatHandler for GenericHandler {
    fn handler_id(&self) -> &'static str {
        "Generic"
    }

    fn sniff(&self, path: &Path) -> Result<String> {
        Ok(extension_tag(path))
    }

    fn supports_phenomena(&self, _format: &str) -> bool {
        false
    }

    fn phenomena(&self, path: &Path, _config: &ExtractionConfig) -> Result<Vec<Phenomenon>> {
        Err(ExtractionError::parse(
            extension_tag(path),
            "no phenomenon capability",
        ))
    }
}
