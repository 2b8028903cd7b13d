//! Scientific file metadata extractor.
//!
//! Walks the given files and directories, extracts catalogue metadata from
//! each file at the configured level and writes one index document per file.

mod config;
mod output;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use walkdir::WalkDir;

use catalog_common::{IndexDocument, ReadStatus};
use config::{load_settings_file, PartialSettings, Settings};
use extraction::Extractor;
use output::DocumentSink;

const LOG_FILE: &str = "extractor.log";

#[derive(Parser, Debug)]
#[command(name = "extractor")]
#[command(about = "Extract catalogue metadata from scientific data files")]
struct Args {
    /// Files or directories to extract
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long, env = "EXTRACTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Extraction level: 1, 2 or 3
    #[arg(short, long)]
    level: Option<u8>,

    /// Longest attribute value kept for columnar formats
    #[arg(long)]
    max_attribute_length: Option<usize>,

    /// Directory receiving one JSON document per file
    #[arg(long)]
    json_path: Option<PathBuf>,

    /// Directory receiving extractor.log
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Print documents to stdout as JSON lines instead of writing files
    #[arg(long)]
    no_create_files: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> PartialSettings {
        PartialSettings {
            level: self.level,
            max_attribute_length: self.max_attribute_length,
            json_path: self.json_path.clone(),
            log_path: self.log_path.clone(),
        }
    }
}

/// Outcome counts of one run.
#[derive(Debug, Default)]
struct Summary {
    extracted: usize,
    read_errors: usize,
    failed: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let from_file = match &args.config {
        Some(path) => load_settings_file(path)?,
        None => PartialSettings::default(),
    };
    let settings = args.overrides().over(from_file).resolve()?;

    init_tracing(&args.log_level, settings.log_path.as_deref())?;
    netcdf_parser::silence_hdf5_errors();

    info!(
        level = %settings.extraction.level,
        max_attribute_length = settings.extraction.max_attribute_length,
        "Starting metadata extractor"
    );

    let sink = match (&settings.json_path, args.no_create_files) {
        (Some(dir), false) => DocumentSink::directory(dir)?,
        _ => DocumentSink::Stdout,
    };

    let summary = run(&settings, &sink, &args.paths);
    info!(
        extracted = summary.extracted,
        read_errors = summary.read_errors,
        failed = summary.failed,
        "Extraction finished"
    );

    Ok(())
}

fn init_tracing(log_level: &str, log_path: Option<&Path>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json();

    match log_path {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {:?}", dir))?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))
                .with_context(|| format!("Failed to open {:?}", dir.join(LOG_FILE)))?;
            let subscriber = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}

/// Regular files under `roots`, directories walked in file name order.
fn collect_files(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => warn!(root = %root.display(), error = %e, "Skipping unreadable path"),
            }
        }
    }
    files
}

fn run(settings: &Settings, sink: &DocumentSink, roots: &[PathBuf]) -> Summary {
    let extractor = Extractor::new(settings.extraction.clone());
    let mut summary = Summary::default();

    for path in collect_files(roots) {
        let record = match extractor.extract_file(&path) {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Extraction failed");
                summary.failed += 1;
                continue;
            }
        };
        if record.read_status() == ReadStatus::ReadError {
            summary.read_errors += 1;
        }

        match sink.write(&path, &IndexDocument::from(&record)) {
            Ok(()) => summary.extracted += 1,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to write document");
                summary.failed += 1;
            }
        }
    }

    summary
}
