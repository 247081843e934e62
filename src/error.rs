//! Structured error types for configuration loading and binding.

use std::path::PathBuf;
use thiserror::Error;

/// All failures surfaced by this crate.
///
/// Every variant is returned to the caller; nothing is logged-and-swallowed
/// and nothing terminates the process. Binding is fail-fast: when a `Bind`
/// error is returned, fields assigned before the failing one keep their
/// values, so callers must treat the target as partially bound.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The call site misused the API (e.g. an empty config path).
    #[error("config target misuse: {0}")]
    Structural(String),

    /// The underlying file could not be opened or read.
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        /// Operation that failed ("open", "read")
        op: &'static str,
        /// File the operation was applied to
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A malformed line in `.env` or YAML-subset input. Aborts the whole
    /// parse; there is no best-effort partial result.
    #[error("malformed line {line}: {reason}")]
    Format {
        /// 1-based line number
        line: usize,
        reason: String,
    },

    /// A resolved raw value could not be parsed as the field's declared type.
    #[error("field `{field}`: cannot parse {value:?} as {expected}")]
    Bind {
        /// Source key of the failing field
        field: String,
        /// Raw value that failed to parse
        value: String,
        /// Human-readable name of the expected type
        expected: String,
    },

    /// A timestamp field was bound without a format layout while the binder
    /// is in the default (mandatory-layout) mode.
    #[error("field `{field}`: timestamp fields require a format layout")]
    MissingFormat {
        /// Source key of the offending field
        field: String,
    },
}

impl ConfigError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        ConfigError::Format {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn bind(field: &str, value: &str, expected: impl Into<String>) -> Self {
        ConfigError::Bind {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
