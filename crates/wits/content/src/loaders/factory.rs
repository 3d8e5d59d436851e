//! Content factory for locating maps and configuration in a data directory.

use std::path::{Path, PathBuf};

use wits_core::{ConvertConfig, MapDefinition};

use crate::loaders::{ConfigLoader, LoadResult, MapLoader};

/// Content factory that loads content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── convert.toml
/// └── maps/
///     └── oml/
///         └── sharkfood-island.json
/// ```
///
/// Map ids may contain `/`; each segment becomes a directory.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load converter configuration from `convert.toml`, or the defaults
    /// when the file does not exist.
    pub fn load_config(&self) -> LoadResult<ConvertConfig> {
        let path = self.data_dir.join("convert.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(ConvertConfig::default())
        }
    }

    /// Path of the file holding `map_id`.
    pub fn map_path(&self, map_id: &str) -> PathBuf {
        let mut path = self.data_dir.join("maps");
        path.extend(map_id.split('/').filter(|segment| !segment.is_empty()));
        path.set_extension("json");
        path
    }

    /// Load and validate the map stored under `maps/{map_id}.json`.
    pub fn load_map(&self, map_id: &str) -> LoadResult<MapDefinition> {
        MapLoader::load(&self.map_path(map_id))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
