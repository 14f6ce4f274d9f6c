//! Command implementations

pub mod access;
pub mod admin;
pub mod matrix;

use std::sync::Arc;

use almoner_permissions::{NavigationMenu, PermissionService, RouteGuard};
use almoner_settings::FileSettingsStore;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// How a command finished, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The checked action is not permitted
    Denied,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Denied => 2,
        }
    }
}

/// Shared state for one CLI invocation
pub struct CommandContext {
    pub service: PermissionService,
    pub menu: NavigationMenu,
    pub guard: RouteGuard,
    pub config: CliConfig,
    /// Skip the revision check when saving
    pub force: bool,
    /// Why the persisted overrides could not be loaded
    pub load_error: Option<String>,
}

impl CommandContext {
    /// Open the configured settings document and load overrides from it
    ///
    /// An unreadable store is not fatal: commands run on the defaults and
    /// only a save without `--force` is refused.
    pub async fn open(config: CliConfig, force: bool) -> CliResult<Self> {
        let store = Arc::new(FileSettingsStore::new(&config.store_path));
        let service = PermissionService::with_settings_store(store, config.permissions.clone());

        let load_error = match service.load().await {
            Ok(report) => {
                for key in &report.skipped {
                    tracing::warn!(key = %key, "Ignored invalid override in settings store");
                }
                None
            }
            Err(e) if e.is_persistence() => {
                tracing::warn!(error = %e, "Continuing with default permissions");
                Some(e.to_string())
            }
            Err(e) => return Err(e.into()),
        };

        let menu = NavigationMenu::default();
        let guard = service.route_guard(menu.clone());
        Ok(Self {
            service,
            menu,
            guard,
            config,
            force,
            load_error,
        })
    }

    /// Persist the in-memory overrides, honouring `--force`
    pub async fn save(&self) -> CliResult<u64> {
        if let (Some(message), false) = (&self.load_error, self.force) {
            return Err(CliError::UnreadableStore {
                message: message.clone(),
            });
        }
        let revision = if self.force {
            self.service.force_save().await?
        } else {
            self.service.save().await?
        };
        Ok(revision)
    }
}
