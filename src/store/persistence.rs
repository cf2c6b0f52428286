//! File I/O for config stores.
//!
//! Writes are whole-file replacements: parent directories are created, any
//! existing file is removed, then the pretty-printed JSON is written followed
//! by a trailing newline. There is no temp-file rename step.

use crate::error::ConfigError;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;

/// Read `path` and parse it as a single JSON object.
///
/// Invalid JSON, an empty file, or any top-level value other than an object
/// is reported as [`ConfigError::Malformed`].
pub fn read_object(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let json: Value = serde_json::from_str(&contents).map_err(|e| ConfigError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match json {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: format!(
                "top-level value is {}, expected an object",
                json_type_name(&other)
            ),
        }),
    }
}

/// Replace the file at `path` with `json`.
pub fn write_json(path: &Path, json: &Value) -> Result<(), ConfigError> {
    if path.is_dir() {
        return Err(ConfigError::IsDirectory {
            path: path.to_path_buf(),
        });
    }

    let to_write_error = |source: io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_write_error)?;
    }

    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(to_write_error(e)),
    }

    let mut payload = serde_json::to_string_pretty(json)?;
    payload.push('\n');
    fs::write(path, payload).map_err(to_write_error)
}

pub(crate) fn json_type_name(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
