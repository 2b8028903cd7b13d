//! Shared test utilities for the sci-catalog workspace.
//!
//! - BADC-CSV and NASA Ames file fixtures, coordinate samples
//! - A synthetic GRIB2 message builder
//! - Temporary directories and files
//!
//! ```ignore
//! use test_utils::{badc_csv, temp_test_dir, write_test_file, Grib2Builder};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;
