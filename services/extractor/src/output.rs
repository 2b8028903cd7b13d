//! Where index documents go.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_common::IndexDocument;
use tracing::debug;

/// Destination for index documents.
#[derive(Debug, Clone)]
pub enum DocumentSink {
    /// One pretty-printed `<file stem>.json` per input file
    Directory(PathBuf),
    /// One JSON line per input file on stdout
    Stdout,
}

impl DocumentSink {
    /// Directory sink, creating the directory if needed.
    pub fn directory(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create JSON output directory {:?}", path))?;
        Ok(DocumentSink::Directory(path))
    }

    pub fn write(&self, source: &Path, document: &IndexDocument) -> Result<()> {
        match self {
            DocumentSink::Directory(dir) => {
                let target = dir.join(document_name(source));
                fs::write(&target, document.to_json_pretty()?)
                    .with_context(|| format!("Failed to write {:?}", target))?;
                debug!(source = %source.display(), target = %target.display(), "Wrote document");
            }
            DocumentSink::Stdout => {
                let line = document.to_json()?;
                writeln!(io::stdout().lock(), "{}", line)?;
            }
        }
        Ok(())
    }
}

/// `<file stem>.json`.
fn document_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    format!("{}.json", stem)
}
