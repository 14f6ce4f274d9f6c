use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Permissions(#[from] almoner_permissions::Error),

    /// Persisted overrides could not be loaded, so a checked save would
    /// overwrite state this invocation never saw
    #[error("Refusing to save over unreadable overrides: {message}")]
    UnreadableStore { message: String },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::Config(msg) => format!(
                "Configuration error: {}\n\nCheck config.toml and ALMONER_* environment variables.",
                msg
            ),
            CliError::Permissions(almoner_permissions::Error::StaleRevision {
                expected,
                actual,
            }) => format!(
                "Overrides were changed by someone else (revision {} -> {}).\n\n\
                 Re-run the command to apply it on top of the latest state, \
                 or pass --force to overwrite.",
                expected, actual
            ),
            CliError::Permissions(e) => format!("Permission store error: {}", e),
            CliError::UnreadableStore { message } => format!(
                "Stored overrides could not be read: {}\n\n\
                 Pass --force to replace them, e.g. 'almoner reset --force'.",
                message
            ),
            CliError::Logging(msg) => format!("Logging setup failed: {}", msg),
        }
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
