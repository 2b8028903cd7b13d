//! NetCDF variable and attribute access.
//!
//! Exposes what catalogue extraction needs from a NetCDF file: every
//! variable with its attribute dictionary, and the numeric values of a
//! single variable.
//!
//! # Implementation Notes
//!
//! Reading goes through the `netcdf` crate and needs the system netcdf and
//! HDF5 libraries (libnetcdf-dev, libhdf5-dev). It is compiled only with the
//! `native` feature; without it [`NetCdfDataset::open`] always fails with
//! [`NetCdfError::Unsupported`].

pub mod error;

#[cfg(feature = "native")]
mod native;

pub use error::{NetCdfError, NetCdfResult};

#[cfg(feature = "native")]
pub use native::{silence_hdf5_errors, NetCdfDataset};

/// A variable and its attributes, values rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl VariableInfo {
    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(not(feature = "native"))]
mod fallback {
    use std::path::Path;

    use crate::{NetCdfError, NetCdfResult, VariableInfo};

    /// No-op without the `native` feature.
    pub fn silence_hdf5_errors() {}

    /// Placeholder that can never be opened.
    pub struct NetCdfDataset {
        _private: (),
    }

    impl NetCdfDataset {
        pub fn open(path: impl AsRef<Path>) -> NetCdfResult<Self> {
            Err(NetCdfError::Unsupported(
                path.as_ref().display().to_string(),
            ))
        }

        pub fn variables(&self) -> NetCdfResult<Vec<VariableInfo>> {
            Ok(Vec::new())
        }

        pub fn values(&self, name: &str) -> NetCdfResult<Vec<f64>> {
            Err(NetCdfError::MissingData(format!("{} variable", name)))
        }
    }
}

#[cfg(not(feature = "native"))]
pub use fallback::{silence_hdf5_errors, NetCdfDataset};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_attribute_lookup() {
        let var = VariableInfo {
            name: "tas".to_string(),
            attributes: vec![
                ("standard_name".to_string(), "air_temperature".to_string()),
                ("units".to_string(), "K".to_string()),
            ],
        };
        assert_eq!(var.attribute("units"), Some("K"));
        assert!(var.attribute("long_name").is_none());
    }

    #[cfg(not(feature = "native"))]
    #[test]
    fn test_open_unsupported_without_native() {
        let result = NetCdfDataset::open("/tmp/anything.nc");
        assert!(matches!(result, Err(NetCdfError::Unsupported(_))));
    }
}
