//! Error types raised by repository implementations.

use thiserror::Error;
use wits_core::{ErrorSeverity, MapError, WitsError};

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    /// Keys become file names and must not leave the repository directory.
    #[error("invalid record key {0:?}")]
    InvalidKey(String),

    #[error("refusing to store invalid map: {0}")]
    InvalidMap(#[from] MapError),
}

impl WitsError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidKey(_) | Self::InvalidMap(_) => ErrorSeverity::Validation,
            Self::LockPoisoned => ErrorSeverity::Internal,
            Self::Io(_) | Self::Json(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Json(_) => "REPOSITORY_JSON",
            Self::InvalidKey(_) => "REPOSITORY_INVALID_KEY",
            Self::InvalidMap(err) => err.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Rejects empty keys and keys that are not plain file names.
pub(crate) fn check_key(key: &str) -> Result<&str> {
    if is_plain_name(key) {
        Ok(key)
    } else {
        Err(RepositoryError::InvalidKey(key.to_owned()))
    }
}

/// Like [`check_key`], but `/` separates nested directories.
pub(crate) fn check_nested_key(key: &str) -> Result<&str> {
    if key.split('/').all(is_plain_name) {
        Ok(key)
    } else {
        Err(RepositoryError::InvalidKey(key.to_owned()))
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_plain_file_names() {
        assert!(check_key("AbC-12_x").is_ok());
        assert!(check_key("oml.sharkfood").is_ok());
        for key in ["", "..", "a/b", "a\\b", "room 1"] {
            assert!(matches!(check_key(key), Err(RepositoryError::InvalidKey(_))), "{key}");
        }
        assert!(check_key("oml/sharkfood").is_err());
        assert!(check_nested_key("oml/sharkfood").is_ok());
        assert!(check_nested_key("oml/../etc").is_err());
        assert!(check_nested_key("/oml").is_err());
    }
}
