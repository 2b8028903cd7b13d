//! Extractor configuration.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! command-line arguments. The YAML file may reference the environment with
//! `${VAR}` or `${VAR:-default}`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_common::Level;
use extraction::config::DEFAULT_MAX_ATTRIBUTE_LENGTH;
use extraction::ExtractionConfig;
use serde::Deserialize;

/// One layer of settings; unset keys fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialSettings {
    pub level: Option<u8>,
    pub max_attribute_length: Option<usize>,
    pub json_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

/// Fully resolved and validated settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub extraction: ExtractionConfig,
    /// Directory for per-file JSON documents
    pub json_path: Option<PathBuf>,
    /// Directory for the log file
    pub log_path: Option<PathBuf>,
}

impl PartialSettings {
    /// Keys set in `self` win over those in `lower`.
    pub fn over(self, lower: PartialSettings) -> PartialSettings {
        PartialSettings {
            level: self.level.or(lower.level),
            max_attribute_length: self.max_attribute_length.or(lower.max_attribute_length),
            json_path: self.json_path.or(lower.json_path),
            log_path: self.log_path.or(lower.log_path),
        }
    }

    pub fn resolve(self) -> Result<Settings> {
        let level = match self.level {
            Some(level) => Level::try_from(level)?,
            None => Level::One,
        };
        let extraction = ExtractionConfig::new(level).with_max_attribute_length(
            self.max_attribute_length
                .unwrap_or(DEFAULT_MAX_ATTRIBUTE_LENGTH),
        );
        extraction.validate()?;

        Ok(Settings {
            extraction,
            json_path: self.json_path,
            log_path: self.log_path,
        })
    }
}

/// Load a YAML settings file with environment variable substitution.
pub fn load_settings_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    parse_settings(&content).with_context(|| format!("Invalid config file {:?}", path))
}

fn parse_settings(content: &str) -> Result<PartialSettings> {
    let expanded = expand_env_vars(content)?;
    if expanded.trim().is_empty() {
        return Ok(PartialSettings::default());
    }
    serde_yaml::from_str(&expanded).context("Failed to parse config YAML")
}

/// Expand `${VAR}` and `${VAR:-default}` references.
fn expand_env_vars(content: &str) -> Result<String> {
    Ok(shellexpand::env(content)
        .context("Environment variable substitution failed")?
        .into_owned())
}
