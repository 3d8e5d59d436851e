//! Map definition loader.
//!
//! Map files are JSON documents with five tile lists, initial units and
//! optional symmetry metadata. A map is only returned once it passes the
//! exclusivity check.

use std::path::Path;

use anyhow::Context;
use wits_core::MapDefinition;

use crate::loaders::{LoadResult, read_file};

/// Loader for map definitions from JSON files.
pub struct MapLoader;

impl MapLoader {
    /// Load and validate a map from a JSON file.
    pub fn load(path: &Path) -> LoadResult<MapDefinition> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid map {}", path.display()))
    }

    /// Parse and validate a map from JSON text.
    pub fn parse(content: &str) -> LoadResult<MapDefinition> {
        let map: MapDefinition = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map JSON: {}", e))?;
        map.validate()?;
        tracing::debug!(map_id = %map.map_id, tiles = map.terrain.len(), "map validated");
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use wits_core::{HexCoord, MapError, WitsError};

    const SMALL_MAP: &str = r#"{
        "name": "Two Bases",
        "map_id": "test/two-bases",
        "terrain": {
            "floor": [[0, 4], [1, 3]],
            "wall": [[0, 2]],
            "bonus": [],
            "spawn": [[[2, 7]], [[10, 7]]],
            "base": [[2, 2], [10, 2]]
        },
        "init": {"units": [{"coord": [1, 3], "team": "RED", "class": "RUNNER"}]}
    }"#;

    #[test]
    fn loads_a_valid_map() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("two-bases.json");
        fs::write(&path, SMALL_MAP).unwrap();

        let map = MapLoader::load(&path).unwrap();
        assert_eq!(map.map_id, "test/two-bases");
        assert_eq!(map.terrain.base().count(), 2);
        assert!(!map.is_legacy());
    }

    #[test]
    fn collision_is_reported_with_its_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, SMALL_MAP.replace("[[0, 4], [1, 3]]", "[[0, 4], [1, 2]]")).unwrap();

        let err = MapLoader::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
        let map_err = err.downcast_ref::<MapError>().unwrap();
        assert_eq!(map_err.error_code(), "MAP_BASE_COLLISION");
        assert!(matches!(
            map_err,
            MapError::BaseCollision { position, .. } if *position == HexCoord::new(1, 2)
        ));
    }

    #[test]
    fn malformed_coordinate_fails_to_parse() {
        let broken = SMALL_MAP.replace("[0, 2]", "[0, 2, 1]");
        let err = MapLoader::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("exactly 2 dimensions"));
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let err = MapLoader::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read file"));
    }
}
