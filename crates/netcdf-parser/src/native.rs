//! Direct NetCDF reading through the netcdf C library.

use std::path::Path;
use std::sync::Once;

use netcdf::AttributeValue;
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::VariableInfo;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when probing attributes
/// that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// Call early, before any HDF5/NetCDF operations occur. Safe to call more than once.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// An open NetCDF file.
pub struct NetCdfDataset {
    file: netcdf::File,
}

impl NetCdfDataset {
    pub fn open(path: impl AsRef<Path>) -> NetCdfResult<Self> {
        silence_hdf5_errors();
        let path = path.as_ref();
        let file = netcdf::open(path)
            .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))?;
        debug!(path = %path.display(), "Opened NetCDF file");
        Ok(Self { file })
    }

    /// Every variable with its attributes rendered as strings, in file order.
    pub fn variables(&self) -> NetCdfResult<Vec<VariableInfo>> {
        let mut variables = Vec::new();
        for var in self.file.variables() {
            let mut attributes = Vec::new();
            for attr in var.attributes() {
                let value = attr.value().map_err(|e| {
                    NetCdfError::InvalidFormat(format!(
                        "Failed to read attribute {} of {}: {}",
                        attr.name(),
                        var.name(),
                        e
                    ))
                })?;
                attributes.push((attr.name().to_string(), render_attribute(value)));
            }
            variables.push(VariableInfo {
                name: var.name(),
                attributes,
            });
        }
        Ok(variables)
    }

    /// All values of a variable, flattened and widened to `f64`.
    pub fn values(&self, name: &str) -> NetCdfResult<Vec<f64>> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;
        var.get_values::<f64, _>(..)
            .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))
    }
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_attribute(value: AttributeValue) -> String {
    match value {
        AttributeValue::Str(s) => s,
        AttributeValue::Strs(s) => s.join(", "),
        AttributeValue::Double(v) => v.to_string(),
        AttributeValue::Doubles(v) => join(&v),
        AttributeValue::Float(v) => v.to_string(),
        AttributeValue::Floats(v) => join(&v),
        AttributeValue::Int(v) => v.to_string(),
        AttributeValue::Ints(v) => join(&v),
        AttributeValue::Short(v) => v.to_string(),
        AttributeValue::Shorts(v) => join(&v),
        other => format!("{:?}", other),
    }
}
