//! CLI configuration
//!
//! Sources, lowest priority first: built-in defaults, the optional
//! `config.toml`, then `ALMONER_*` environment variables
//! (`ALMONER_LOG_LEVEL=debug`, `ALMONER_PERMISSIONS__STRICT_LOAD=false`
//! for nested keys).

use std::path::{Path, PathBuf};

use almoner_permissions::PermissionsConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Resolved CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Settings document holding the persisted overrides
    pub store_path: PathBuf,
    /// Minimum log level
    pub log_level: String,
    /// Permission engine settings
    pub permissions: PermissionsConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_path: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("almoner")
                .join("settings.json"),
            log_level: "warn".to_string(),
            permissions: PermissionsConfig::default(),
        }
    }
}

/// Loads [`CliConfig`] from file and environment
pub struct ConfigLoader {
    config_path: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a loader using the default config path
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create with a custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: "ALMONER".to_string(),
        }
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("almoner")
            .join("config.toml")
    }

    /// Load and validate the configuration
    pub fn load(&self) -> CliResult<CliConfig> {
        let config = Config::builder()
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let cli_config: CliConfig = config.try_deserialize()?;
        Self::validate(&cli_config)?;
        Ok(cli_config)
    }

    /// Configuration file this loader reads, if present
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reject configurations the CLI cannot act on
    pub fn validate(config: &CliConfig) -> CliResult<()> {
        if config.store_path.as_os_str().is_empty() {
            return Err(CliError::Config("store_path must not be empty".to_string()));
        }
        if !config.permissions.fallback_path.starts_with('/') {
            return Err(CliError::Config(format!(
                "permissions.fallback_path must be absolute, got '{}'",
                config.permissions.fallback_path
            )));
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
