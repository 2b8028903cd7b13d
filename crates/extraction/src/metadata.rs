//! File type detection.
//!
//! The extension decides first; files whose extension says nothing are
//! classified by their leading bytes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::badc;

/// Detected file type based on extension and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Comma separated text, BADC-CSV or plain
    Csv,
    /// GRIB edition 2 message stream (edition 1 files are detected but not decoded)
    Grib,
    /// NetCDF classic or NetCDF-4/HDF5
    NetCdf,
    /// NASA Ames text format
    NasaAmes,
    /// Unknown format
    Unknown,
}

/// Number of leading bytes examined for a content signature.
const SIGNATURE_LEN: usize = 256;

/// Detect file type from the path's extension alone.
pub fn detect_file_type(path: &str) -> FileType {
    let lower = path.to_lowercase();

    if lower.ends_with(".csv") {
        FileType::Csv
    } else if lower.ends_with(".grib2")
        || lower.ends_with(".grb2")
        || lower.ends_with(".grib")
        || lower.ends_with(".grb")
    {
        FileType::Grib
    } else if lower.ends_with(".nc")
        || lower.ends_with(".nc4")
        || lower.ends_with(".netcdf")
        || lower.ends_with(".cdf")
    {
        FileType::NetCdf
    } else if lower.ends_with(".na") {
        FileType::NasaAmes
    } else {
        FileType::Unknown
    }
}

/// Classify leading file bytes.
pub fn detect_signature(head: &[u8]) -> FileType {
    if head.starts_with(b"GRIB") {
        return FileType::Grib;
    }
    if head.starts_with(b"CDF\x01") || head.starts_with(b"CDF\x02") || head.starts_with(b"\x89HDF")
    {
        return FileType::NetCdf;
    }

    let first_line = String::from_utf8_lossy(head);
    let first_line = first_line.lines().next().unwrap_or_default();
    if first_line.contains(badc::SIGNATURE) {
        FileType::Csv
    } else if is_nasa_ames_first_line(first_line) {
        FileType::NasaAmes
    } else {
        FileType::Unknown
    }
}

/// `NLHEAD FFI`: two integers, the second a four digit format index.
fn is_nasa_ames_first_line(line: &str) -> bool {
    let mut fields = line.split_whitespace();
    let (Some(nlhead), Some(ffi), None) = (fields.next(), fields.next(), fields.next()) else {
        return false;
    };
    nlhead.parse::<u32>().is_ok()
        && ffi.len() == 4
        && ffi.parse::<u32>().is_ok_and(|f| (1001..=4010).contains(&f))
}

/// Detect file type, reading the file head when the extension is not
/// recognised.
pub fn detect(path: &Path) -> std::io::Result<FileType> {
    let by_extension = detect_file_type(&path.to_string_lossy());
    if by_extension != FileType::Unknown {
        return Ok(by_extension);
    }

    let mut head = Vec::with_capacity(SIGNATURE_LEN);
    File::open(path)?
        .take(SIGNATURE_LEN as u64)
        .read_to_end(&mut head)?;
    Ok(detect_signature(&head))
}

/// Lower-cased extension used as the format tag of unrecognised files.
pub fn extension_tag(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
