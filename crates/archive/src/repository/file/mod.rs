//! File-based repository implementations: one pretty-printed JSON file per
//! record, written to a temporary file and renamed into place.

mod map;
mod replay;

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{RepositoryError, Result};

pub use map::FileMapRepository;
pub use replay::FileReplayRepository;

fn write_json<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("json.tmp");
    let json =
        serde_json::to_string_pretty(record).map_err(|e| RepositoryError::Json(e.to_string()))?;
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| RepositoryError::Json(format!("{}: {e}", path.display())))
}
