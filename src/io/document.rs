//! JSON documents for atlases and maps

use serde::Serialize;
use std::path::Path;

use crate::io::error::{ComposerError, Result};

/// Serialize a record as pretty-printed JSON
///
/// # Errors
///
/// Returns `Serialization` if the value cannot be represented as JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write a record as a JSON document, creating parent directories
///
/// # Errors
///
/// Returns an error if serialization fails, the parent directory cannot be
/// created or the file cannot be written
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = to_json(value)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ComposerError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(path, json).map_err(|e| ComposerError::FileSystem {
        path: path.to_path_buf(),
        operation: "write document",
        source: e,
    })
}
