//! Settings store error types

use thiserror::Error;

/// Result type for settings store operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors that can occur while reading or writing settings rows
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A conditional write observed a different revision than expected
    #[error("Revision conflict on '{key}': expected {expected}, found {actual}")]
    Conflict {
        key: String,
        expected: u64,
        actual: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing service failed or is unreachable
    #[error("Backend error: {0}")]
    Backend(String),
}

impl SettingsError {
    /// Create a revision conflict error
    pub fn conflict(key: impl Into<String>, expected: u64, actual: u64) -> Self {
        Self::Conflict {
            key: key.into(),
            expected,
            actual,
        }
    }

    /// Whether retrying after a fresh read could succeed
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
