//! File I/O utilities with atomic writes
//!
//! Repositories keep their whole collection in one JSON document; writes go
//! to a sibling temp file that is synced and renamed into place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TeamFinError;

fn storage_error(context: &str, path: &Path, err: impl std::fmt::Display) -> TeamFinError {
    TeamFinError::Storage(format!("{} {}: {}", context, path.display(), err))
}

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, TeamFinError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_error("Failed to open", path, e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| storage_error("Failed to parse", path, e))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TeamFinError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| storage_error("Failed to create directory", parent, e))?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| storage_error("Failed to create temp file", &temp_path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("Failed to serialize", path, e))?;
    writer
        .flush()
        .map_err(|e| storage_error("Failed to flush", &temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("Failed to sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_error("Failed to replace", path, e)
    })?;

    Ok(())
}
