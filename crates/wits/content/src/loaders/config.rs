//! Converter configuration loader.

use std::path::Path;

use wits_core::ConvertConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for converter configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<ConvertConfig> {
        let content = read_file(path)?;
        let config: ConvertConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }

    /// Load `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> LoadResult<ConvertConfig> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(ConvertConfig::default()),
        }
    }
}
