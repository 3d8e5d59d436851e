//! Platform-specific directory utilities.

use std::path::PathBuf;

/// Environment variable overriding the archive data directory.
pub const DATA_DIR_ENV: &str = "WITS_DATA_DIR";

/// Resolves the archive data directory.
///
/// An explicit path wins, then `WITS_DATA_DIR`, then the platform data
/// directory:
/// - macOS: `~/Library/Application Support/wits`
/// - Linux: `~/.local/share/wits` (or `$XDG_DATA_HOME/wits`)
/// - Windows: `%APPDATA%\wits`
/// - Fallback: `./wits_data`
pub fn data_dir(explicit: Option<PathBuf>) -> PathBuf {
    resolve(explicit, std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
}

fn resolve(explicit: Option<PathBuf>, from_env: Option<PathBuf>) -> PathBuf {
    explicit
        .or(from_env.filter(|dir| !dir.as_os_str().is_empty()))
        .unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "wits")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./wits_data"))
        })
}

/// Where `convert --store` keeps converted replays.
pub fn replay_dir(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("replays")
}
