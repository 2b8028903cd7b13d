//! Columnar-variable handlers: NetCDF and NASA Ames.
//!
//! Both formats declare a list of variables with descriptive attributes.
//! Semantic discovery of time and coordinate axes works through CF
//! `standard_name` tags, which only NetCDF provides.

use std::path::Path;

use catalog_common::{Phenomenon, PhenomenonAttribute, SpatialExtent, TemporalExtent};
use netcdf_parser::{NetCdfDataset, VariableInfo};
use tracing::debug;

use super::FormatHandler;
use crate::config::{standard_names, ExtractionConfig, VAR_ID};
use crate::error::{ExtractionError, Result};
use crate::geometry::geometry_from_raw;
use crate::nasa_ames::NasaAmesFile;
use crate::normalize::time_extent;
use crate::phenomena::{filter_long_attributes, PhenomenonBuilder};

pub const NETCDF_FORMAT: &str = "NetCDF";
pub const NASA_AMES_FORMAT: &str = "NASA Ames";

/// Variable enumeration and value access for a columnar file.
pub trait VariableSource {
    fn variables(&self) -> Result<Vec<VariableInfo>>;

    /// Every value of variable `name`, flattened.
    fn values(&self, name: &str) -> Result<Vec<f64>>;
}

impl VariableSource for NetCdfDataset {
    fn variables(&self) -> Result<Vec<VariableInfo>> {
        Ok(NetCdfDataset::variables(self)?)
    }

    fn values(&self, name: &str) -> Result<Vec<f64>> {
        Ok(NetCdfDataset::values(self, name)?)
    }
}

impl VariableSource for NasaAmesFile {
    fn variables(&self) -> Result<Vec<VariableInfo>> {
        Ok(self
            .variables
            .iter()
            .map(|v| {
                let mut attributes = vec![("name".to_string(), v.name.clone())];
                if let Some(units) = &v.units {
                    attributes.push(("units".to_string(), units.clone()));
                }
                VariableInfo {
                    name: v.name.clone(),
                    attributes,
                }
            })
            .collect())
    }

    fn values(&self, name: &str) -> Result<Vec<f64>> {
        Err(ExtractionError::AttributeMissing(format!(
            "values of {} are not read from NASA Ames headers",
            name
        )))
    }
}

/// First variable whose `standard_name` matches, ignoring case.
pub fn find_by_standard_name<'a>(
    variables: &'a [VariableInfo],
    standard_name: &str,
) -> Option<&'a VariableInfo> {
    variables.iter().find(|v| {
        v.attribute(standard_names::STANDARD_NAME)
            .is_some_and(|s| s.eq_ignore_ascii_case(standard_name))
    })
}

/// One phenomenon per variable: its attributes plus `var_id`, with values
/// longer than `max_attribute_length` dropped.
///
/// A variable left with no attributes yields no phenomenon.
pub fn columnar_phenomena<S: VariableSource + ?Sized>(
    source: &S,
    max_attribute_length: usize,
) -> Result<Vec<Phenomenon>> {
    let mut builder = PhenomenonBuilder::new();
    let mut dropped = 0;

    for variable in source.variables()? {
        let mut attributes: Vec<PhenomenonAttribute> = variable
            .attributes
            .iter()
            .map(|(name, value)| PhenomenonAttribute::new(name.as_str(), value.as_str()))
            .collect();
        attributes.push(PhenomenonAttribute::new(VAR_ID, variable.name.as_str()));

        let kept = filter_long_attributes(attributes, max_attribute_length);
        if kept.is_empty() {
            dropped += 1;
            continue;
        }
        builder.replace(&variable.name, kept);
    }

    if dropped > 0 {
        debug!(dropped = dropped, "Variables without short attributes omitted");
    }
    Ok(builder.build()?)
}

/// Temporal extent of the variable tagged `time`.
pub fn columnar_temporal<S: VariableSource + ?Sized>(source: &S) -> Result<TemporalExtent> {
    let variables = source.variables()?;
    let time = find_by_standard_name(&variables, standard_names::TIME).ok_or_else(|| {
        ExtractionError::AttributeMissing("variable with standard_name time".to_string())
    })?;
    let units = time.attribute(standard_names::UNITS).ok_or_else(|| {
        ExtractionError::AttributeMissing(format!("units of {}", time.name))
    })?;

    let values = source.values(&time.name)?;
    time_extent(&values, units, time.attribute(standard_names::CALENDAR))
}

/// Search geometry of the variables tagged `latitude` and `longitude`.
pub fn columnar_spatial<S: VariableSource + ?Sized>(source: &S) -> Result<SpatialExtent> {
    let variables = source.variables()?;
    let missing = |what: &str| {
        ExtractionError::AttributeMissing(format!("variable with standard_name {}", what))
    };

    let lat = find_by_standard_name(&variables, standard_names::LATITUDE)
        .ok_or_else(|| missing(standard_names::LATITUDE))?;
    let lon = find_by_standard_name(&variables, standard_names::LONGITUDE)
        .ok_or_else(|| missing(standard_names::LONGITUDE))?;

    let geometry = geometry_from_raw(&source.values(&lat.name)?, &source.values(&lon.name)?)
        .ok_or_else(|| ExtractionError::AttributeMissing("valid coordinates".to_string()))?;
    if let Some(SpatialExtent::Track { lat, .. }) = &geometry.display {
        debug!(vertices = lat.len(), "Built display track");
    }
    Ok(geometry.search)
}

/// NetCDF handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetCdfHandler;

impl NetCdfHandler {
    fn open(&self, path: &Path) -> Result<NetCdfDataset> {
        Ok(NetCdfDataset::open(path)?)
    }
}

impl FormatHandler for NetCdfHandler {
    fn handler_id(&self) -> &'static str {
        NETCDF_FORMAT
    }

    fn sniff(&self, _path: &Path) -> Result<String> {
        Ok(NETCDF_FORMAT.to_string())
    }

    fn phenomena(&self, path: &Path, config: &ExtractionConfig) -> Result<Vec<Phenomenon>> {
        columnar_phenomena(&self.open(path)?, config.max_attribute_length)
    }

    fn temporal(&self, path: &Path) -> Result<TemporalExtent> {
        columnar_temporal(&self.open(path)?)
    }

    fn spatial(&self, path: &Path) -> Result<SpatialExtent> {
        columnar_spatial(&self.open(path)?)
    }
}

/// NASA Ames handler; phenomena only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NasaAmesHandler;

impl FormatHandler for NasaAmesHandler {
    fn handler_id(&self) -> &'static str {
        NASA_AMES_FORMAT
    }

    fn sniff(&self, _path: &Path) -> Result<String> {
        Ok(NASA_AMES_FORMAT.to_string())
    }

    fn phenomena(&self, path: &Path, config: &ExtractionConfig) -> Result<Vec<Phenomenon>> {
        columnar_phenomena(&NasaAmesFile::open(path)?, config.max_attribute_length)
    }
}
