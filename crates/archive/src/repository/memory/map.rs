use std::collections::BTreeMap;
use std::sync::RwLock;

use wits_core::MapDefinition;

use crate::repository::error::check_nested_key;
use crate::repository::{MapRepository, RepositoryError, Result};

/// In-memory map repository.
#[derive(Default)]
pub struct InMemoryMapRepository {
    maps: RwLock<BTreeMap<String, MapDefinition>>,
}

impl InMemoryMapRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapRepository for InMemoryMapRepository {
    fn save(&self, map: &MapDefinition) -> Result<String> {
        let key = check_nested_key(&map.map_id)?.to_owned();
        map.validate()?;
        let mut maps = self.maps.write().map_err(|_| RepositoryError::LockPoisoned)?;
        maps.insert(key.clone(), map.clone());
        Ok(key)
    }

    fn load(&self, map_id: &str) -> Result<Option<MapDefinition>> {
        let maps = self.maps.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(maps.get(map_id).cloned())
    }

    fn list(&self) -> Result<Vec<String>> {
        let maps = self.maps.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(maps.keys().cloned().collect())
    }
}
