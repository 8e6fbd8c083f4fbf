//! Property file loading from disk.

use std::fs;
use std::path::Path;

use crate::runtime::AppError;

/// Read a property file in full.
///
/// The bytes are returned untouched; JSON parsing is left to the host.
pub fn read_property_file(path: &Path) -> Result<Vec<u8>, AppError> {
    fs::read(path).map_err(|source| AppError::PropertyFile {
        path: path.to_path_buf(),
        source,
    })
}
