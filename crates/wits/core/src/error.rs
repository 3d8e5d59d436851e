//! Common error infrastructure for wits-core.
//!
//! Domain-specific errors (e.g. [`crate::map::MapError`]) live next to the
//! structures they validate. Everything that can fail while decoding a replay
//! or a map implements [`WitsError`] so callers can log a stable code and
//! classify the failure without matching on every variant.
//!
//! None of these errors are retryable: inputs are static archive records, so
//! a second attempt reproduces the same failure.

/// Severity level of an error, used for categorization and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// A single value is out of range or has the wrong shape.
    ///
    /// Examples: coordinate with three components, unknown unit class
    Validation,

    /// The record as a whole cannot be used.
    ///
    /// Examples: broken wire envelope, action before the first checkpoint
    Fatal,

    /// A precondition of the pipeline itself did not hold.
    ///
    /// Examples: spawn without its spawn-tile selection, unknown unit index
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error points at a bug or broken source assumption
    /// rather than at bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all pipeline errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Error codes are SCREAMING_SNAKE_CASE and prefixed by the owning area
pub trait WitsError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Archive inputs never change between attempts.
    fn is_retryable(&self) -> bool {
        false
    }
}

// ============================================================================
// Codec Errors
// ============================================================================

/// Errors raised while decoding coordinates, enums and canonical actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Coordinate was neither `[i, j]` nor `{"i": .., "j": ..}`.
    #[error("a coordinate should have exactly 2 dimensions (found {found})")]
    MalformedCoordinate { found: String },

    /// Integer out of range or unrecognized name for a closed enumeration.
    #[error("invalid {kind} value {value}")]
    InvalidEnumValue { kind: &'static str, value: String },

    /// Canonical action JSON carried a name outside the vocabulary.
    #[error("unknown action name {0:?}")]
    UnknownAction(String),

    /// Canonical action JSON had the right name but the wrong fields.
    #[error("malformed {name} action: {reason}")]
    MalformedAction { name: String, reason: String },
}

impl CodecError {
    pub fn coordinate_len(found: usize) -> Self {
        Self::MalformedCoordinate {
            found: found.to_string(),
        }
    }

    pub fn coordinate_shape(found: impl Into<String>) -> Self {
        Self::MalformedCoordinate {
            found: found.into(),
        }
    }

    pub fn invalid_enum(kind: &'static str, value: impl ToString) -> Self {
        Self::InvalidEnumValue {
            kind,
            value: value.to_string(),
        }
    }
}

impl WitsError for CodecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedCoordinate { .. } => "CODEC_MALFORMED_COORDINATE",
            Self::InvalidEnumValue { .. } => "CODEC_INVALID_ENUM_VALUE",
            Self::UnknownAction(_) => "CODEC_UNKNOWN_ACTION",
            Self::MalformedAction { .. } => "CODEC_MALFORMED_ACTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_error_names_the_element_count() {
        let err = CodecError::coordinate_len(3);
        assert_eq!(
            err.to_string(),
            "a coordinate should have exactly 2 dimensions (found 3)"
        );
        assert_eq!(err.error_code(), "CODEC_MALFORMED_COORDINATE");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(!err.is_retryable());
    }

    #[test]
    fn severity_strings() {
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
    }
}
