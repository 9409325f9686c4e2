//! File I/O utilities with atomic writes

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::SplitError;

/// Read JSON from a file, returning an error if the file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, SplitError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(SplitError::Io(format!("File not found: {}", path.display())));
    }

    let file = File::open(path)
        .map_err(|e| SplitError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| SplitError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Replace a JSON file in one step
///
/// The data is written to a temporary file next to `path` and renamed over
/// it, so readers see either the old file or the complete new one.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SplitError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .map_err(|e| SplitError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| SplitError::Io(format!("Failed to create temp file in {}: {}", dir.display(), e)))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| SplitError::Json(format!("Failed to serialize {}: {}", path.display(), e)))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    temp.persist(path)
        .map_err(|e| SplitError::Io(format!("Failed to replace {}: {}", path.display(), e.error)))?;

    debug!(path = %path.display(), "wrote json file");
    Ok(())
}
