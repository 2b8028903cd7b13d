//! Common test fixtures for sci-catalog tests.
//!
//! This module provides pre-defined file contents that represent common
//! scenarios in scientific file cataloguing.

/// BADC-CSV file contents.
pub mod badc_csv {
    /// Global date and location rows, one phenomenon with units, then data.
    pub const GLOBAL_TEMPERATURE: &str = "\
Conventions,G,BADC-CSV,1
date_valid,G,2020-01-01
location,G,global
standard_name,1,air_temperature,K
data
Time,Temperature
0,273.15
";

    /// Global location with a date no parser accepts.
    pub const UNPARSEABLE_DATE: &str = "\
Conventions,G,BADC-CSV,1
date_valid,G,sometime in spring
location,G,global
long_name,1,Sea surface temperature,K
data
";

    /// Two phenomena spread over interleaved rows.
    pub const TWO_PHENOMENA: &str = "\
Conventions,G,BADC-CSV,1
title,G,Surface observations
long_name,1,Air temperature,degC
long_name,2,Wind speed,m/s
comments,1,Dry bulb
standard_name,2,wind_speed
date_valid,G,2019-06-30 12:00:00
location,G,Chilbolton
data
1,2
";

    /// Attribute rows that follow the sentinel must never be read.
    pub const ROWS_AFTER_SENTINEL: &str = "\
Conventions,G,BADC-CSV,1
long_name,1,Rainfall
data
long_name,2,Never seen
standard_name,3,never_seen,mm
end data
";

    /// A plain comma separated file without the BADC-CSV marker.
    pub const PLAIN_CSV: &str = "\
time,value
0,1.5
1,2.5
";

    /// Short rows interleaved with valid ones.
    pub const MALFORMED_ROWS: &str = "\
Conventions,G,BADC-CSV,1
long_name,1

units,1,K
orphan
data
";
}

/// NASA Ames file headers.
pub mod nasa_ames {
    /// FFI 1001: one independent and two dependent variables.
    pub const FFI_1001: &str = "\
16 1001
Smith, John
Example Institute
Aircraft temperature probe
TEST CAMPAIGN
1 1
2020 01 01 2020 01 02
0
Time (seconds since 2020-01-01 00:00:00)
2
1 1
-9999 -9999
Temperature (K)
Pressure (hPa)
0
0
0 273.1 1000.0
1 273.4 999.5
";

    /// FFI 1001 with one dependent variable declared twice.
    pub const DUPLICATE_VARIABLE: &str = "\
16 1001
Doe, Jane
Example Institute
Sonde
TEST CAMPAIGN
1 1
2021 05 04 2021 05 04
0
Altitude (m)
2
1 1
-9999 -9999
Ozone (ppbv)
Ozone (ppmv)
0
0
";
}

/// Coordinate sequences for geometry tests.
pub mod coords {
    /// Ten samples along a straight flight track, no fill values.
    pub const TRACK_LATS: [f64; 10] = [50.0, 50.5, 51.0, 51.5, 52.0, 52.5, 53.0, 53.5, 54.0, 54.5];
    pub const TRACK_LONS: [f64; 10] = [-5.0, -4.5, -4.0, -3.5, -3.0, -2.5, -2.0, -1.5, -1.0, -0.5];

    /// A sequence mixing valid values with fill values and non-numbers.
    pub const DIRTY: [f64; 7] = [0.0, 12.5, f64::NAN, -3.25, 0.0, f64::INFINITY, 7.0];
    pub const DIRTY_CLEANED: [f64; 3] = [12.5, -3.25, 7.0];
}

/// Envelope corner pairs in `[[min_lon, max_lat], [max_lon, min_lat]]` order.
pub mod envelope {
    /// The whole globe
    pub const GLOBAL: [[f64; 2]; 2] = [[-180.0, 90.0], [180.0, -90.0]];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badc_fixtures_have_sentinel() {
        for text in [
            badc_csv::GLOBAL_TEMPERATURE,
            badc_csv::TWO_PHENOMENA,
            badc_csv::ROWS_AFTER_SENTINEL,
        ] {
            assert!(text.starts_with("Conventions,G,BADC-CSV"));
            assert!(text.lines().any(|l| l == "data"));
        }
        assert!(!badc_csv::PLAIN_CSV.contains("BADC-CSV"));
    }

    #[test]
    fn test_nasa_ames_first_line() {
        assert!(nasa_ames::FFI_1001.starts_with("16 1001"));
        assert!(nasa_ames::DUPLICATE_VARIABLE.starts_with("16 1001"));
    }

    #[test]
    fn test_track_lengths_match() {
        assert_eq!(coords::TRACK_LATS.len(), coords::TRACK_LONS.len());
    }
}
