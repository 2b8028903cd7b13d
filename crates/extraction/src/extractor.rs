//! Tiered extraction orchestrator.

use std::path::Path;

use catalog_common::{FileRecord, Level, MetadataRecord, ReadStatus};
use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::error::{ExtractionError, Result};
use crate::handlers::{FormatHandler, Handler};

/// Drives level 1, 2 and 3 extraction through a format handler.
///
/// Level 1 is file identity and size. Level 2 adds phenomena; if they
/// cannot be extracted the level-1 record comes back flagged
/// [`ReadStatus::ReadError`]. Level 3 adds temporal and spatial extents,
/// each attempted on its own and simply left out when unavailable.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract a file at the configured level with the handler its type
    /// selects.
    pub fn extract_file(&self, path: &Path) -> Result<MetadataRecord> {
        let handler = Handler::for_file(path)?;
        self.extract(path, self.config.level, &handler)
    }

    /// Extract `path` at `level` using `handler`.
    ///
    /// Only a file that cannot be stat'ed or opened yields an error.
    pub fn extract<H: FormatHandler + ?Sized>(
        &self,
        path: &Path,
        level: Level,
        handler: &H,
    ) -> Result<MetadataRecord> {
        let size = std::fs::metadata(path)
            .map_err(|e| ExtractionError::read(path, e))?
            .len();
        let format = handler.sniff(path)?;
        let identity = |status: ReadStatus| {
            FileRecord::new(path, size, format.as_str(), handler.handler_id(), status)
        };

        if level == Level::One {
            return Ok(MetadataRecord::identity(identity(ReadStatus::Successful)));
        }
        if !handler.supports_phenomena(&format) {
            debug!(
                path = %path.display(),
                format = %format,
                requested = %level,
                "Handler offers identity only"
            );
            return Ok(MetadataRecord::identity(identity(ReadStatus::Successful)));
        }

        let phenomena = match handler.phenomena(path, &self.config) {
            Ok(phenomena) => phenomena,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    handler = handler.handler_id(),
                    error = %e,
                    "Phenomenon extraction failed, falling back to level 1"
                );
                return Ok(MetadataRecord::identity(identity(ReadStatus::ReadError)));
            }
        };

        let mut record = MetadataRecord {
            file: identity(ReadStatus::Successful),
            phenomena,
            temporal: None,
            spatial: None,
            level: Level::Two,
        };

        if level == Level::Three {
            record.temporal = optional(handler.temporal(path), path, "temporal");
            record.spatial = optional(handler.spatial(path), path, "spatial");
            record.level = Level::Three;
        }

        info!(
            path = %path.display(),
            handler = handler.handler_id(),
            level = %record.level,
            phenomena = record.phenomena.len(),
            temporal = record.temporal.is_some(),
            spatial = record.spatial.is_some(),
            "Extracted metadata"
        );
        Ok(record)
    }
}

fn optional<T>(result: Result<T>, path: &Path, field: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_missing() => {
            debug!(path = %path.display(), field = field, reason = %e, "Field omitted");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), field = field, error = %e, "Field extraction failed");
            None
        }
    }
}
