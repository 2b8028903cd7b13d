//! NASA Ames header reader.
//!
//! Supports the one-independent-variable file format indices 1001 and
//! 1010, which share the header layout up to the dependent variable names:
//!
//! ```text
//! NLHEAD FFI
//! ONAME / ORG / SNAME / MNAME        (one line each)
//! IVOL NVOL
//! DATE RDATE                         (six integers)
//! DX
//! XNAME
//! NV
//! VSCAL                              (NV values)
//! VMISS                              (NV values)
//! VNAME                              (NV lines)
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{ExtractionError, Result};

const FORMAT: &str = "NASA Ames";
const SUPPORTED_FFI: [u16; 2] = [1001, 1010];

/// A dependent variable declared in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NasaAmesVariable {
    pub name: String,
    pub units: Option<String>,
}

/// Parsed NASA Ames header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NasaAmesFile {
    pub ffi: u16,
    pub originator: String,
    pub mission: String,
    /// Independent variable description
    pub independent: NasaAmesVariable,
    /// Dependent variables, keyed by name in first-seen order
    pub variables: Vec<NasaAmesVariable>,
}

/// Split `Temperature (K)` into `Temperature` and `K`.
pub fn split_units(label: &str) -> NasaAmesVariable {
    let label = label.trim();
    if let Some(stripped) = label.strip_suffix(')') {
        if let Some(open) = stripped.rfind('(') {
            let name = stripped[..open].trim();
            let units = stripped[open + 1..].trim();
            if !name.is_empty() {
                return NasaAmesVariable {
                    name: name.to_string(),
                    units: (!units.is_empty()).then(|| units.to_string()),
                };
            }
        }
    }
    NasaAmesVariable {
        name: label.to_string(),
        units: None,
    }
}

struct HeaderLines<I> {
    lines: I,
    line_no: usize,
}

impl<I: Iterator<Item = std::io::Result<String>>> HeaderLines<I> {
    fn next_line(&mut self, what: &str) -> Result<String> {
        self.line_no += 1;
        match self.lines.next() {
            Some(line) => line.map_err(|e| ExtractionError::parse(FORMAT, e.to_string())),
            None => Err(ExtractionError::parse(
                FORMAT,
                format!("header ends before {} (line {})", what, self.line_no),
            )),
        }
    }

    fn next_integers(&mut self, what: &str) -> Result<Vec<i64>> {
        let line = self.next_line(what)?;
        line.split_whitespace()
            .map(|field| {
                field.parse::<i64>().map_err(|_| {
                    ExtractionError::parse(
                        FORMAT,
                        format!("expected integer {} on line {}: {}", what, self.line_no, field),
                    )
                })
            })
            .collect()
    }
}

impl NasaAmesFile {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ExtractionError::read(path, e))?;
        let parsed = Self::from_reader(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            ffi = parsed.ffi,
            variables = parsed.variables.len(),
            "Read NASA Ames header"
        );
        Ok(parsed)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut header = HeaderLines {
            lines: reader.lines(),
            line_no: 0,
        };

        let first = header.next_integers("NLHEAD FFI")?;
        let ffi = match first.as_slice() {
            [_, ffi] => u16::try_from(*ffi).ok(),
            _ => None,
        }
        .ok_or_else(|| ExtractionError::parse(FORMAT, "first line is not NLHEAD FFI"))?;
        if !SUPPORTED_FFI.contains(&ffi) {
            return Err(ExtractionError::parse(
                FORMAT,
                format!("unsupported file format index {}", ffi),
            ));
        }

        let originator = header.next_line("ONAME")?.trim().to_string();
        header.next_line("ORG")?;
        header.next_line("SNAME")?;
        let mission = header.next_line("MNAME")?.trim().to_string();
        header.next_integers("IVOL NVOL")?;
        header.next_integers("DATE RDATE")?;
        header.next_line("DX")?;
        let independent = split_units(&header.next_line("XNAME")?);

        let nv = match header.next_integers("NV")?.as_slice() {
            [nv] if *nv >= 0 => *nv as usize,
            _ => return Err(ExtractionError::parse(FORMAT, "invalid NV line")),
        };
        let scale_factors = header.next_line("VSCAL")?.split_whitespace().count();
        if scale_factors != nv {
            return Err(ExtractionError::parse(
                FORMAT,
                format!("NV is {} but VSCAL holds {} values", nv, scale_factors),
            ));
        }
        header.next_line("VMISS")?;

        let mut variables: Vec<NasaAmesVariable> = Vec::new();
        for _ in 0..nv {
            let variable = split_units(&header.next_line("VNAME")?);
            match variables.iter_mut().find(|v| v.name == variable.name) {
                Some(existing) => *existing = variable,
                None => variables.push(variable),
            }
        }

        Ok(Self {
            ffi,
            originator,
            mission,
            independent,
            variables,
        })
    }
}
