//! Format handlers.
//!
//! Every supported format implements [`FormatHandler`]. [`Handler`] is the
//! closed set of handlers the extractor chooses from, selected by
//! [`Handler::for_file`] from the file's extension or content signature.

mod badc_csv;
mod columnar;
mod generic;
mod grib;

use std::path::Path;

use catalog_common::{Phenomenon, SpatialExtent, TemporalExtent};

use crate::config::ExtractionConfig;
use crate::error::{ExtractionError, Result};
use crate::metadata::{detect, FileType};

pub use badc_csv::{parse_badc_csv, BadcCsvHandler, BadcHeader, BADC_CSV_FORMAT, PLAIN_CSV_FORMAT};
pub use columnar::{
    columnar_phenomena, columnar_spatial, columnar_temporal, find_by_standard_name,
    NasaAmesHandler, NetCdfHandler, VariableSource,
};
pub use generic::GenericHandler;
pub use grib::{grib_phenomena, GribHandler, MessageKeys};

/// Capabilities of one file format.
///
/// `temporal` and `spatial` report an absent extent as
/// [`ExtractionError::AttributeMissing`].
pub trait FormatHandler {
    /// Identifier recorded in the file record.
    fn handler_id(&self) -> &'static str;

    /// Format tag of this particular file.
    fn sniff(&self, path: &Path) -> Result<String>;

    /// Whether phenomena can be extracted for a file sniffed as `format`.
    fn supports_phenomena(&self, _format: &str) -> bool {
        true
    }

    fn phenomena(&self, path: &Path, config: &ExtractionConfig) -> Result<Vec<Phenomenon>>;

    fn temporal(&self, _path: &Path) -> Result<TemporalExtent> {
        Err(ExtractionError::AttributeMissing("temporal extent".to_string()))
    }

    fn spatial(&self, _path: &Path) -> Result<SpatialExtent> {
        Err(ExtractionError::AttributeMissing("spatial extent".to_string()))
    }
}

/// The handlers known to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    BadcCsv(BadcCsvHandler),
    Grib(GribHandler),
    NetCdf(NetCdfHandler),
    NasaAmes(NasaAmesHandler),
    Generic(GenericHandler),
}

impl Handler {
    /// Handler for a detected file type.
    pub fn for_type(file_type: FileType) -> Self {
        match file_type {
            FileType::Csv => Handler::BadcCsv(BadcCsvHandler),
            FileType::Grib => Handler::Grib(GribHandler),
            FileType::NetCdf => Handler::NetCdf(NetCdfHandler),
            FileType::NasaAmes => Handler::NasaAmes(NasaAmesHandler),
            FileType::Unknown => Handler::Generic(GenericHandler),
        }
    }

    /// Choose a handler by extension, falling back to the content signature.
    pub fn for_file(path: &Path) -> Result<Self> {
        let file_type = detect(path).map_err(|e| ExtractionError::read(path, e))?;
        Ok(Self::for_type(file_type))
    }

    fn inner(&self) -> &dyn FormatHandler {
        match self {
            Handler::BadcCsv(h) => h,
            Handler::Grib(h) => h,
            Handler::NetCdf(h) => h,
            Handler::NasaAmes(h) => h,
            Handler::Generic(h) => h,
        }
    }
}

impl FormatHandler for Handler {
    fn handler_id(&self) -> &'static str {
        self.inner().handler_id()
    }

    fn sniff(&self, path: &Path) -> Result<String> {
        self.inner().sniff(path)
    }

    fn supports_phenomena(&self, format: &str) -> bool {
        self.inner().supports_phenomena(format)
    }

    fn phenomena(&self, path: &Path, config: &ExtractionConfig) -> Result<Vec<Phenomenon>> {
        self.inner().phenomena(path, config)
    }

    fn temporal(&self, path: &Path) -> Result<TemporalExtent> {
        self.inner().temporal(path)
    }

    fn spatial(&self, path: &Path) -> Result<SpatialExtent> {
        self.inner().spatial(path)
    }
}
