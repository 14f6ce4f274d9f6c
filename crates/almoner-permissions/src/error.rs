//! Error types for the permissions system

use thiserror::Error;

/// Result type for permissions operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the permissions system
///
/// Permission checks never return these; an unknown role, module or
/// permission simply resolves to "denied".
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    #[error("Malformed permission key: {0}")]
    MalformedKey(String),

    #[error("Role '{0}' cannot be overridden")]
    ImmutableRole(String),

    #[error("Malformed override payload: {0}")]
    MalformedOverrides(String),

    #[error("Failed to load permission overrides: {0}")]
    LoadFailed(String),

    #[error("Failed to save permission overrides: {0}")]
    SaveFailed(String),

    #[error("Overrides changed since last load (expected revision {expected}, found {actual})")]
    StaleRevision { expected: u64, actual: u64 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error came from the persistence boundary
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Error::MalformedOverrides(_)
                | Error::LoadFailed(_)
                | Error::SaveFailed(_)
                | Error::StaleRevision { .. }
                | Error::SerializationError(_)
        )
    }
}
