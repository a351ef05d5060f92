//! JSON file persistence helpers shared by the state index and the
//! workspace file.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{DockrunError, Result};

/// Reads a JSON document, returning `T::default()` when the file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn read_json_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(DockrunError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(&content)?)
}

/// Writes a JSON document atomically: a sibling temp file is written and
/// then renamed over `path`. Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the directory, temp file, or rename fails.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| DockrunError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let body = serde_json::to_vec_pretty(value)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&body).map_err(io_err)?;
    tmp.write_all(b"\n").map_err(io_err)?;
    let _ = tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
