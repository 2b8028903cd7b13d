//! BADC-CSV tabular handler.
//!
//! A BADC-CSV header is a sequence of `name,group,value[,units]` rows. The
//! group column is either a phenomenon identifier or `G` for file-global
//! metadata; a row whose first column is `data` ends the header.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use catalog_common::{parse_datetime, BoundingBox, Phenomenon, SpatialExtent, TemporalExtent};
use tracing::debug;

use super::FormatHandler;
use crate::config::{badc, ExtractionConfig};
use crate::error::{ExtractionError, Result};
use crate::phenomena::{sanitize, PhenomenonBuilder};

pub const BADC_CSV_FORMAT: &str = "BADC CSV";
pub const PLAIN_CSV_FORMAT: &str = "CSV";

/// Everything read from a BADC-CSV header.
#[derive(Debug, Clone, PartialEq)]
pub struct BadcHeader {
    pub phenomena: Vec<Phenomenon>,
    /// Last `date_valid` value seen
    pub date: Option<String>,
    /// Last `location` value seen
    pub location: Option<String>,
    /// Rows skipped as too short
    pub skipped_rows: usize,
}

enum Row<'a> {
    Sentinel,
    Global { name: &'a str, value: Option<&'a str> },
    Attribute {
        id: &'a str,
        name: &'a str,
        value: &'a str,
        units: Option<&'a str>,
    },
}

fn classify<'a>(fields: &'a [Cow<'a, str>], row: usize) -> Result<Row<'a>> {
    let malformed = |message: &str| ExtractionError::MalformedRow {
        row,
        message: message.to_string(),
    };

    let column = move |i: usize| fields.get(i).map(|f| &**f);

    let name = column(0).ok_or_else(|| malformed("empty row"))?;
    if name == badc::DATA_SENTINEL {
        return Ok(Row::Sentinel);
    }
    let group = column(1).ok_or_else(|| malformed("missing group column"))?;

    if group == badc::GLOBAL_MARKER {
        return Ok(Row::Global {
            name,
            value: column(2),
        });
    }

    let value = column(2).ok_or_else(|| malformed("missing value column"))?;
    let units = column(3)
        .filter(|_| fields.len() == 4 && badc::UNIT_BEARING_FIELDS.contains(&name));
    Ok(Row::Attribute {
        id: group,
        name,
        value,
        units,
    })
}

/// Parse a BADC-CSV header from any reader.
pub fn parse_badc_csv<R: Read>(reader: R) -> Result<BadcHeader> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut builder = PhenomenonBuilder::new();
    let mut date = None;
    let mut location = None;
    let mut skipped_rows = 0;

    for (index, record) in csv_reader.byte_records().enumerate() {
        let record =
            record.map_err(|e| ExtractionError::parse(BADC_CSV_FORMAT, e.to_string()))?;
        let fields: Vec<Cow<str>> = record.iter().map(String::from_utf8_lossy).collect();

        match classify(&fields, index + 1) {
            Ok(Row::Sentinel) => break,
            Ok(Row::Global { name, value }) => match (name, value) {
                (badc::DATE_VALID, Some(v)) => date = Some(v.to_string()),
                (badc::LOCATION, Some(v)) => location = Some(v.to_string()),
                (badc::DATE_VALID | badc::LOCATION, None) => {
                    debug!(row = index + 1, name = name, "Global row without value");
                    skipped_rows += 1;
                }
                _ => {}
            },
            Ok(Row::Attribute {
                id,
                name,
                value,
                units,
            }) => {
                builder.push(id, name, sanitize(value));
                if let Some(units) = units {
                    builder.push(id, badc::UNITS, units);
                }
            }
            Err(e) => {
                debug!(error = %e, "Skipping BADC-CSV row");
                skipped_rows += 1;
            }
        }
    }

    Ok(BadcHeader {
        phenomena: builder.build()?,
        date,
        location,
        skipped_rows,
    })
}

/// BADC-CSV (and plain CSV) handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BadcCsvHandler;

impl BadcCsvHandler {
    fn parse(&self, path: &Path) -> Result<BadcHeader> {
        let file = File::open(path).map_err(|e| ExtractionError::read(path, e))?;
        let header = parse_badc_csv(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            phenomena = header.phenomena.len(),
            skipped_rows = header.skipped_rows,
            "Parsed BADC-CSV header"
        );
        Ok(header)
    }
}

impl FormatHandler for BadcCsvHandler {
    fn handler_id(&self) -> &'static str {
        BADC_CSV_FORMAT
    }

    fn sniff(&self, path: &Path) -> Result<String> {
        let file = File::open(path).map_err(|e| ExtractionError::read(path, e))?;
        let mut first_line = Vec::new();
        BufReader::new(file)
            .read_until(b'\n', &mut first_line)
            .map_err(|e| ExtractionError::read(path, e))?;

        let format = if String::from_utf8_lossy(&first_line).contains(badc::SIGNATURE) {
            BADC_CSV_FORMAT
        } else {
            PLAIN_CSV_FORMAT
        };
        Ok(format.to_string())
    }

    fn supports_phenomena(&self, format: &str) -> bool {
        format == BADC_CSV_FORMAT
    }

    fn phenomena(&self, path: &Path, _config: &ExtractionConfig) -> Result<Vec<Phenomenon>> {
        Ok(self.parse(path)?.phenomena)
    }

    fn temporal(&self, path: &Path) -> Result<TemporalExtent> {
        let date = self
            .parse(path)?
            .date
            .ok_or_else(|| ExtractionError::AttributeMissing(badc::DATE_VALID.to_string()))?;
        Ok(TemporalExtent::instant(parse_datetime(&date)?))
    }

    fn spatial(&self, path: &Path) -> Result<SpatialExtent> {
        match self.parse(path)?.location {
            Some(location) if location == badc::GLOBAL_LOCATION => {
                Ok(SpatialExtent::Envelope(BoundingBox::global()))
            }
            Some(location) => Err(ExtractionError::AttributeMissing(format!(
                "no geometry for location '{}'",
                location
            ))),
            None => Err(ExtractionError::AttributeMissing(badc::LOCATION.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::badc_csv;

    fn attrs(phen: &Phenomenon) -> Vec<(&str, &str)> {
        phen.attributes()
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_str()))
            .collect()
    }

    #[test]
    fn test_global_rows_and_units() {
        let header = parse_badc_csv(badc_csv::GLOBAL_TEMPERATURE.as_bytes()).unwrap();
        assert_eq!(header.date.as_deref(), Some("2020-01-01"));
        assert_eq!(header.location.as_deref(), Some("global"));
        assert_eq!(header.phenomena.len(), 1);
        assert_eq!(header.phenomena[0].id(), "1");
        assert_eq!(
            attrs(&header.phenomena[0]),
            vec![("standard_name", "air_temperature"), ("units", "K")]
        );
    }

    #[test]
    fn test_phenomena_accumulate_in_first_seen_order() {
        let header = parse_badc_csv(badc_csv::TWO_PHENOMENA.as_bytes()).unwrap();
        let ids: Vec<_> = header.phenomena.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(
            attrs(&header.phenomena[0]),
            vec![
                ("long_name", "Air temperature"),
                ("units", "degC"),
                ("comments", "Dry bulb")
            ]
        );
        // standard_name with three columns carries no units
        assert_eq!(
            attrs(&header.phenomena[1]),
            vec![
                ("long_name", "Wind speed"),
                ("units", "m/s"),
                ("standard_name", "wind_speed")
            ]
        );
        assert_eq!(header.location.as_deref(), Some("Chilbolton"));
    }

    #[test]
    fn test_sentinel_halts_parsing() {
        let header = parse_badc_csv(badc_csv::ROWS_AFTER_SENTINEL.as_bytes()).unwrap();
        assert_eq!(header.phenomena.len(), 1);
        assert_eq!(header.phenomena[0].attribute("long_name"), Some("Rainfall"));
    }

    #[test]
    fn test_units_only_for_canonical_fields_with_four_columns() {
        let text = "comments,1,hello,extra\nlong_name,1,Temp,K,extra\n";
        let header = parse_badc_csv(text.as_bytes()).unwrap();
        assert!(header.phenomena[0].attribute("units").is_none());
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let header = parse_badc_csv(badc_csv::MALFORMED_ROWS.as_bytes()).unwrap();
        assert_eq!(header.phenomena.len(), 1);
        assert_eq!(header.phenomena[0].attribute("units"), Some("K"));
        assert!(header.skipped_rows >= 2);
    }

    #[test]
    fn test_non_ascii_sanitized() {
        let text = "long_name,1,Temp \u{b0}C\n";
        let header = parse_badc_csv(text.as_bytes()).unwrap();
        assert_eq!(header.phenomena[0].attribute("long_name"), Some("Temp  C"));
    }

    #[test]
    fn test_later_global_row_overwrites() {
        let text = "date_valid,G,2001-01-01\ndate_valid,G,2002-02-02\n";
        let header = parse_badc_csv(text.as_bytes()).unwrap();
        assert_eq!(header.date.as_deref(), Some("2002-02-02"));
        assert!(header.phenomena.is_empty());
    }
}
