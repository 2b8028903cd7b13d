//! End-to-end extraction through the tiered orchestrator.

use std::path::Path;

use catalog_common::{
    IndexDocument, Level, MetadataRecord, Phenomenon, ReadStatus, SpatialExtent, TemporalExtent,
};
use extraction::handlers::{
    columnar_phenomena, columnar_spatial, columnar_temporal, VariableSource,
};
use extraction::{ExtractionConfig, ExtractionError, Extractor, FormatHandler, Handler, Result};
use netcdf_parser::VariableInfo;
use serde_json::json;
use test_utils::{badc_csv, fixtures, grib2_stream, nasa_ames, temp_test_dir, write_test_file, Grib2Builder};

fn extract(path: &Path, level: Level) -> MetadataRecord {
    let handler = Handler::for_file(path).expect("handler selection");
    Extractor::default()
        .extract(path, level, &handler)
        .expect("file is readable")
}

// ============================================================================
// BADC-CSV
// ============================================================================

#[test]
fn test_badc_csv_level_three() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "obs.csv", badc_csv::GLOBAL_TEMPERATURE);

    let record = extract(&path, Level::Three);

    assert_eq!(record.level, Level::Three);
    assert_eq!(record.read_status(), ReadStatus::Successful);
    assert_eq!(record.file.format(), "BADC CSV");

    let temporal = record.temporal.expect("date_valid gives a temporal extent");
    assert_eq!(temporal.start_time(), "2020-01-01T00:00:00");
    assert_eq!(temporal.end_time(), "2020-01-01T00:00:00");

    match record.spatial {
        Some(SpatialExtent::Envelope(bbox)) => {
            assert_eq!(bbox.envelope_corners(), fixtures::envelope::GLOBAL);
        }
        other => panic!("expected global envelope, got {:?}", other),
    }

    assert_eq!(record.phenomena.len(), 1);
    let names: Vec<_> = record.phenomena[0]
        .attributes()
        .iter()
        .map(|a| (a.name.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(names, vec![("standard_name", "air_temperature"), ("units", "K")]);
}

#[test]
fn test_badc_csv_named_location_has_no_spatial_extent() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "obs.csv", badc_csv::TWO_PHENOMENA);

    let record = extract(&path, Level::Three);

    assert_eq!(record.read_status(), ReadStatus::Successful);
    assert!(record.spatial.is_none());
    assert_eq!(
        record.temporal.map(|t| t.start_time()),
        Some("2019-06-30T12:00:00".to_string())
    );
}

#[test]
fn test_badc_csv_bad_date_keeps_spatial_extent() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "sst.csv", badc_csv::UNPARSEABLE_DATE);

    let record = extract(&path, Level::Three);

    assert_eq!(record.read_status(), ReadStatus::Successful);
    assert_eq!(record.level, Level::Three);
    assert_eq!(record.phenomena.len(), 1);
    assert!(record.temporal.is_none());
    match record.spatial {
        Some(SpatialExtent::Envelope(bbox)) => {
            assert_eq!(bbox.envelope_corners(), fixtures::envelope::GLOBAL);
        }
        other => panic!("expected global envelope, got {:?}", other),
    }
}

#[test]
fn test_plain_csv_is_level_one_only() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "table.csv", badc_csv::PLAIN_CSV);

    let record = extract(&path, Level::Three);

    assert_eq!(record.level, Level::One);
    assert_eq!(record.file.format(), "CSV");
    assert_eq!(record.read_status(), ReadStatus::Successful);
    assert!(record.phenomena.is_empty());
}

#[test]
fn test_monotonic_levels() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "obs.csv", badc_csv::GLOBAL_TEMPERATURE);

    let keys = |level| {
        let doc = serde_json::to_value(IndexDocument::from(&extract(&path, level))).unwrap();
        doc.as_object().unwrap().keys().cloned().collect::<Vec<_>>()
    };
    let (one, two, three) = (keys(Level::One), keys(Level::Two), keys(Level::Three));

    assert_eq!(one, vec!["info"]);
    assert!(one.iter().all(|k| two.contains(k)));
    assert!(two.iter().all(|k| three.contains(k)));
    assert_eq!(three.len(), 4);
}

// ============================================================================
// GRIB
// ============================================================================

#[test]
fn test_grib_identical_messages_give_one_phenomenon() {
    let dir = temp_test_dir();
    let path = write_test_file(
        dir.path(),
        "surface.grib2",
        grib2_stream(&[Grib2Builder::new(), Grib2Builder::new()]),
    );

    let record = extract(&path, Level::Two);

    assert_eq!(record.read_status(), ReadStatus::Successful);
    assert_eq!(record.phenomena.len(), 1);
    assert_eq!(record.phenomena[0].attribute("shortName"), Some("TMP"));
    assert_eq!(record.phenomena[0].attribute("var_id"), Some("None"));
}

#[test]
fn test_grib_time_steps_share_one_phenomenon() {
    let dir = temp_test_dir();
    let path = write_test_file(
        dir.path(),
        "forecast.grib2",
        grib2_stream(&[
            Grib2Builder::new().with_reference_time(2020, 1, 1, 0),
            Grib2Builder::new()
                .with_reference_time(2020, 1, 1, 6)
                .with_gradient(270.0, 290.0),
            Grib2Builder::new()
                .with_reference_time(2020, 1, 1, 12)
                .with_gradient(275.0, 295.0),
        ]),
    );

    let record = extract(&path, Level::Two);

    assert_eq!(record.read_status(), ReadStatus::Successful);
    assert_eq!(record.phenomena.len(), 1);
    assert_eq!(record.phenomena[0].id(), "1");
}

#[test]
fn test_grib_distinct_parameters_kept_in_order() {
    let dir = temp_test_dir();
    let path = write_test_file(
        dir.path(),
        "wind.grb2",
        grib2_stream(&[
            Grib2Builder::new().with_parameter(2, 2),
            Grib2Builder::new().with_parameter(2, 3),
            Grib2Builder::new().with_parameter(2, 2).with_level(103, 100),
        ]),
    );

    let record = extract(&path, Level::Three);

    let short_names: Vec<_> = record
        .phenomena
        .iter()
        .filter_map(|p| p.attribute("shortName"))
        .collect();
    assert_eq!(short_names, vec!["UGRD", "VGRD"]);
    assert_eq!(record.level, Level::Three);
    assert!(record.temporal.is_none());
    assert!(record.spatial.is_none());
}

#[test]
fn test_corrupted_grib_is_read_error() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "broken.grib2", b"GRIB\x00\x00\x00\x02garbage");

    let record = extract(&path, Level::Three);

    assert_eq!(record.read_status(), ReadStatus::ReadError);
    assert_eq!(record.level, Level::One);
    assert!(record.phenomena.is_empty());
    assert!(record.temporal.is_none());
    assert!(record.spatial.is_none());
}

#[test]
fn test_grib_edition_one_is_read_error() {
    let dir = temp_test_dir();
    let mut bytes = b"GRIB\x00\x00\x20\x01".to_vec();
    bytes.resize(28, 0);
    bytes.extend_from_slice(b"7777");
    let path = write_test_file(dir.path(), "legacy.grb", bytes);

    let record = extract(&path, Level::Two);

    assert_eq!(record.file.handler(), "GRIB");
    assert_eq!(record.read_status(), ReadStatus::ReadError);
    assert_eq!(record.level, Level::One);
}

// ============================================================================
// Columnar formats
// ============================================================================

#[test]
fn test_corrupted_netcdf_at_level_two() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "model.nc", b"CDF\x01 truncated");

    let record = extract(&path, Level::Two);

    assert_eq!(record.read_status(), ReadStatus::ReadError);
    assert_eq!(record.level, Level::One);
    assert!(record.phenomena.is_empty());
    assert_eq!(record.file.size(), 14);
}

#[test]
fn test_nasa_ames_phenomena() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "flight.na", nasa_ames::FFI_1001);

    let record = extract(&path, Level::Three);

    assert_eq!(record.file.format(), "NASA Ames");
    assert_eq!(record.read_status(), ReadStatus::Successful);
    let ids: Vec<_> = record.phenomena.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["Temperature", "Pressure"]);
    assert!(record.temporal.is_none());
}

#[test]
fn test_nasa_ames_corrupt_variable_count_is_read_error() {
    let dir = temp_test_dir();
    let text = nasa_ames::FFI_1001.replacen("\n2\n1 1\n", "\n999999999999999\n1 1\n", 1);
    let path = write_test_file(dir.path(), "corrupt.na", text);

    for level in [Level::Two, Level::Three] {
        let record = extract(&path, level);
        assert_eq!(record.read_status(), ReadStatus::ReadError);
        assert_eq!(record.level, Level::One);
        assert!(record.phenomena.is_empty());
    }
}

#[test]
fn test_nasa_ames_detected_by_content() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "flight.txt", nasa_ames::FFI_1001);
    assert_eq!(Handler::for_file(&path).unwrap().handler_id(), "NASA Ames");
}

/// A gridded dataset held in memory.
struct Grid {
    variables: Vec<(VariableInfo, Vec<f64>)>,
}

impl Grid {
    fn variable(name: &str, attrs: &[(&str, &str)], values: Vec<f64>) -> (VariableInfo, Vec<f64>) {
        let info = VariableInfo {
            name: name.to_string(),
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        (info, values)
    }
}

impl VariableSource for Grid {
    fn variables(&self) -> Result<Vec<VariableInfo>> {
        Ok(self.variables.iter().map(|(v, _)| v.clone()).collect())
    }

    fn values(&self, name: &str) -> Result<Vec<f64>> {
        self.variables
            .iter()
            .find(|(v, _)| v.name == name)
            .map(|(_, values)| values.clone())
            .ok_or_else(|| ExtractionError::AttributeMissing(name.to_string()))
    }
}

/// Serves an in-memory grid for any path.
struct GridHandler(Grid);

impl FormatHandler for GridHandler {
    fn handler_id(&self) -> &'static str {
        "Grid"
    }

    fn sniff(&self, _path: &Path) -> Result<String> {
        Ok("NetCDF".to_string())
    }

    fn phenomena(&self, _path: &Path, config: &ExtractionConfig) -> Result<Vec<Phenomenon>> {
        columnar_phenomena(&self.0, config.max_attribute_length)
    }

    fn temporal(&self, _path: &Path) -> Result<TemporalExtent> {
        columnar_temporal(&self.0)
    }

    fn spatial(&self, _path: &Path) -> Result<SpatialExtent> {
        columnar_spatial(&self.0)
    }
}

#[test]
fn test_grid_without_time_axis_is_successful() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "grid.nc", b"placeholder");
    let handler = GridHandler(Grid {
        variables: vec![
            Grid::variable("lat", &[("standard_name", "latitude")], vec![50.0, 51.0]),
            Grid::variable("lon", &[("standard_name", "longitude")], vec![-1.0, 1.0]),
            Grid::variable("tas", &[("standard_name", "air_temperature")], vec![280.0]),
        ],
    });

    let record = Extractor::default()
        .extract(&path, Level::Three, &handler)
        .unwrap();

    assert_eq!(record.read_status(), ReadStatus::Successful);
    assert_eq!(record.level, Level::Three);
    assert_eq!(record.phenomena.len(), 3);
    assert!(record.temporal.is_none());

    let doc = serde_json::to_value(IndexDocument::from(&record)).unwrap();
    assert!(doc.get("temporal").is_none());
    assert_eq!(
        doc["spatial"]["coordinates"],
        json!({"type": "envelope", "coordinates": [[-1.0, 51.0], [1.0, 50.0]]})
    );
}

#[test]
fn test_grid_with_time_axis() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "grid.nc", b"placeholder");
    let handler = GridHandler(Grid {
        variables: vec![Grid::variable(
            "time",
            &[
                ("standard_name", "time"),
                ("units", "hours since 2021-03-01 00:00:00"),
                ("calendar", "standard"),
            ],
            vec![0.0, 6.0, 12.0],
        )],
    });

    let record = Extractor::default()
        .extract(&path, Level::Three, &handler)
        .unwrap();

    let temporal = record.temporal.unwrap();
    assert_eq!(temporal.start_time(), "2021-03-01T00:00:00");
    assert_eq!(temporal.end_time(), "2021-03-01T12:00:00");
    assert!(record.spatial.is_none());
}

// ============================================================================
// Error containment
// ============================================================================

/// Phenomena always fail; extents would succeed if ever asked for.
struct FailingHandler;

impl FormatHandler for FailingHandler {
    fn handler_id(&self) -> &'static str {
        "Failing"
    }

    fn sniff(&self, _path: &Path) -> Result<String> {
        Ok("Failing".to_string())
    }

    fn phenomena(&self, _path: &Path, _config: &ExtractionConfig) -> Result<Vec<Phenomenon>> {
        Err(ExtractionError::parse("Failing", "induced failure"))
    }

    fn temporal(&self, _path: &Path) -> Result<TemporalExtent> {
        panic!("level 3 must not run after a level 2 failure")
    }
}

#[test]
fn test_phenomenon_failure_never_escapes() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "any.dat", b"content");

    for level in [Level::Two, Level::Three] {
        let record = Extractor::default()
            .extract(&path, level, &FailingHandler)
            .expect("failure is contained");
        assert_eq!(record.read_status(), ReadStatus::ReadError);
        assert_eq!(record.level, Level::One);
        assert!(record.phenomena.is_empty());
    }

    let record = Extractor::default()
        .extract(&path, Level::One, &FailingHandler)
        .unwrap();
    assert_eq!(record.read_status(), ReadStatus::Successful);
}

#[test]
fn test_missing_file_is_the_only_error() {
    let dir = temp_test_dir();
    let path = dir.path().join("absent.csv");
    let handler = Handler::for_type(extraction::FileType::Csv);

    let result = Extractor::default().extract(&path, Level::One, &handler);
    assert!(matches!(result, Err(ExtractionError::Read { .. })));
}

#[test]
fn test_generic_file_identity() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "notes.TXT", "free text\n");

    let record = Extractor::new(ExtractionConfig::new(Level::Three))
        .extract_file(&path)
        .unwrap();

    assert_eq!(record.level, Level::One);
    assert_eq!(record.file.handler(), "Generic");
    assert_eq!(record.file.format(), "txt");
    assert_eq!(record.file.size(), 10);
    assert_eq!(record.read_status(), ReadStatus::Successful);
}
