//! GRIB2 parameter lookup table.
//!
//! Translates the numeric `(discipline, category, number)` triple of a
//! product definition into a short name, a descriptive name and canonical
//! units. Parameters missing from the table simply have no names; callers
//! treat those keys as undefined.

/// Lookup key for parameter: (discipline, category, number)
pub type ParamKey = (u8, u8, u8);

/// Descriptive entry for one GRIB2 parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterEntry {
    pub short_name: &'static str,
    pub name: &'static str,
    pub units: &'static str,
}

const fn entry(short_name: &'static str, name: &'static str, units: &'static str) -> ParameterEntry {
    ParameterEntry {
        short_name,
        name,
        units,
    }
}

/// Look up a parameter by its numeric triple.
pub fn lookup_parameter(discipline: u8, category: u8, number: u8) -> Option<ParameterEntry> {
    let found = match (discipline, category, number) {
        // Discipline 0, category 0: temperature
        (0, 0, 0) => entry("TMP", "Temperature", "K"),
        (0, 0, 1) => entry("VTMP", "Virtual temperature", "K"),
        (0, 0, 2) => entry("POT", "Potential temperature", "K"),
        (0, 0, 4) => entry("TMAX", "Maximum temperature", "K"),
        (0, 0, 5) => entry("TMIN", "Minimum temperature", "K"),
        (0, 0, 6) => entry("DPT", "Dew point temperature", "K"),

        // Category 1: moisture
        (0, 1, 0) => entry("SPFH", "Specific humidity", "kg kg-1"),
        (0, 1, 1) => entry("RH", "Relative humidity", "%"),
        (0, 1, 3) => entry("PWAT", "Precipitable water", "kg m-2"),
        (0, 1, 7) => entry("PRATE", "Precipitation rate", "kg m-2 s-1"),
        (0, 1, 8) => entry("APCP", "Total precipitation", "kg m-2"),
        (0, 1, 9) => entry("NCPCP", "Large-scale precipitation", "kg m-2"),
        (0, 1, 10) => entry("ACPCP", "Convective precipitation", "kg m-2"),

        // Category 2: momentum
        (0, 2, 0) => entry("WDIR", "Wind direction", "degree true"),
        (0, 2, 1) => entry("WIND", "Wind speed", "m s-1"),
        (0, 2, 2) => entry("UGRD", "u-component of wind", "m s-1"),
        (0, 2, 3) => entry("VGRD", "v-component of wind", "m s-1"),
        (0, 2, 8) => entry("VVEL", "Vertical velocity (pressure)", "Pa s-1"),
        (0, 2, 10) => entry("ABSV", "Absolute vorticity", "s-1"),
        (0, 2, 22) => entry("GUST", "Wind speed (gust)", "m s-1"),

        // Category 3: mass
        (0, 3, 0) => entry("PRES", "Pressure", "Pa"),
        (0, 3, 1) => entry("PRMSL", "Pressure reduced to MSL", "Pa"),
        (0, 3, 5) => entry("HGT", "Geopotential height", "gpm"),

        // Category 6: cloud
        (0, 6, 1) => entry("TCDC", "Total cloud cover", "%"),
        (0, 6, 3) => entry("LCDC", "Low cloud cover", "%"),
        (0, 6, 4) => entry("MCDC", "Medium cloud cover", "%"),
        (0, 6, 5) => entry("HCDC", "High cloud cover", "%"),
        (0, 6, 6) => entry("CWAT", "Cloud water", "kg m-2"),

        // Category 7: thermodynamic stability
        (0, 7, 6) => entry("CAPE", "Convective available potential energy", "J kg-1"),
        (0, 7, 7) => entry("CIN", "Convective inhibition", "J kg-1"),
        (0, 7, 8) => entry("HLCY", "Storm relative helicity", "m2 s-2"),

        // Category 19: physical atmospheric properties
        (0, 19, 0) => entry("VIS", "Visibility", "m"),
        (0, 19, 11) => entry("TKE", "Turbulent kinetic energy", "J kg-1"),

        // Discipline 2: land surface
        (2, 0, 0) => entry("LAND", "Land cover", "Proportion"),
        (2, 0, 1) => entry("SFCR", "Surface roughness", "m"),

        // Discipline 10: oceanographic
        (10, 0, 3) => entry("HTSGW", "Significant height of combined wind waves and swell", "m"),
        (10, 3, 0) => entry("WTMP", "Water temperature", "K"),

        _ => return None,
    };
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_parameter() {
        let tmp = lookup_parameter(0, 0, 0).unwrap();
        assert_eq!(tmp.short_name, "TMP");
        assert_eq!(tmp.name, "Temperature");
        assert_eq!(tmp.units, "K");
    }

    #[test]
    fn test_wind_components() {
        assert_eq!(lookup_parameter(0, 2, 2).unwrap().short_name, "UGRD");
        assert_eq!(lookup_parameter(0, 2, 3).unwrap().short_name, "VGRD");
    }

    #[test]
    fn test_unknown_parameter() {
        assert!(lookup_parameter(0, 0, 250).is_none());
        assert!(lookup_parameter(209, 0, 16).is_none());
    }
}
