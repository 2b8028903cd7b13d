//! Temporary directories and files for tests.

use std::path::{Path, PathBuf};

/// Creates a temporary directory, removed when the returned `TempDir` drops.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Writes `contents` to `dir/name` and returns the full path.
pub fn write_test_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}
