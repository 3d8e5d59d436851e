use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wits_core::MapDefinition;

use super::{read_json, write_json};
use crate::batch::is_json;
use crate::repository::error::check_nested_key;
use crate::repository::{MapRepository, Result};

/// Stores each map as `<base_dir>/<map_id>.json`; a `/` in the id becomes a
/// subdirectory, matching the layout of the content data directory.
pub struct FileMapRepository {
    base_dir: PathBuf,
}

impl FileMapRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn map_path(&self, map_id: &str) -> Result<PathBuf> {
        Ok(self.base_dir.join(format!("{}.json", check_nested_key(map_id)?)))
    }

    /// Map id of a stored file, `None` for anything that is not a map.
    fn map_id(&self, path: &Path) -> Option<String> {
        if !is_json(path) {
            return None;
        }
        let relative = path.strip_prefix(&self.base_dir).ok()?.with_extension("");
        let segments: Option<Vec<&str>> = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect();
        Some(segments?.join("/"))
    }
}

impl MapRepository for FileMapRepository {
    fn save(&self, map: &MapDefinition) -> Result<String> {
        let path = self.map_path(&map.map_id)?;
        map.validate()?;
        write_json(&path, map)?;
        tracing::debug!("Saved map: {}", path.display());
        Ok(map.map_id.clone())
    }

    fn load(&self, map_id: &str) -> Result<Option<MapDefinition>> {
        read_json(&self.map_path(map_id)?)
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.base_dir).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(id) = self.map_id(entry.path()) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}
