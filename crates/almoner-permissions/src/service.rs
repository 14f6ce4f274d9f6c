//! Session-scoped permission service
//!
//! One `PermissionService` is built per application session and handed to
//! navigation, route guards and the administrative matrix. Checks are
//! synchronous and only take a short read lock; `load` and `save` are the
//! only operations that touch the settings store.

use parking_lot::RwLock;
use std::sync::Arc;

use almoner_settings::SettingsStore;

use crate::config::PermissionsConfig;
use crate::error::Result;
use crate::matrix::PermissionMatrix;
use crate::navigation::{NavigationMenu, RouteGuard};
use crate::permission::{
    CapabilityGate, DecisionSource, Module, OverrideStore, Permission, PermissionKey,
    PermissionResolver, Role,
};
use crate::storage::{OverrideRepository, SettingsOverrideRepository};

/// Summary of a successful load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Overrides now in effect
    pub loaded: usize,
    /// Persisted keys rejected during lenient decoding
    pub skipped: Vec<String>,
    /// Persisted entries dropped because they equalled the default
    pub normalized: usize,
    /// Revision of the persisted row
    pub revision: u64,
}

/// Last state known to match the settings store
#[derive(Debug, Default)]
struct Persisted {
    overrides: OverrideStore,
    revision: u64,
    loaded: bool,
}

/// Permission engine for one session
pub struct PermissionService {
    overrides: RwLock<OverrideStore>,
    persisted: RwLock<Persisted>,
    repository: Arc<dyn OverrideRepository>,
    config: PermissionsConfig,
}

impl PermissionService {
    /// Create a service over an override repository
    ///
    /// Until [`load`](Self::load) succeeds every check uses the defaults.
    pub fn new(repository: Arc<dyn OverrideRepository>, config: PermissionsConfig) -> Self {
        Self {
            overrides: RwLock::new(OverrideStore::new()),
            persisted: RwLock::new(Persisted::default()),
            repository,
            config,
        }
    }

    /// Create a service persisting to a settings store
    pub fn with_settings_store(store: Arc<dyn SettingsStore>, config: PermissionsConfig) -> Self {
        Self::new(Arc::new(SettingsOverrideRepository::new(store)), config)
    }

    /// Active configuration
    pub fn config(&self) -> &PermissionsConfig {
        &self.config
    }

    /// Effective value for one role
    pub fn resolve(&self, role: Role, module: Module, permission: Permission) -> bool {
        let overrides = self.overrides.read();
        PermissionResolver::new(&overrides).resolve(role, module, permission)
    }

    /// Effective value and where it came from
    pub fn explain(
        &self,
        role: Role,
        module: Module,
        permission: Permission,
    ) -> (bool, DecisionSource) {
        let overrides = self.overrides.read();
        PermissionResolver::new(&overrides).explain(&PermissionKey::new(role, module, permission))
    }

    /// Whether the triple currently carries an override
    pub fn is_overridden(&self, role: Role, module: Module, permission: Permission) -> bool {
        let overrides = self.overrides.read();
        PermissionResolver::new(&overrides).is_overridden(role, module, permission)
    }

    /// Whether any of `roles` grants `permission` on `module`
    pub fn can_access(&self, roles: &[Role], module: Module, permission: Permission) -> bool {
        let overrides = self.overrides.read();
        CapabilityGate::new(PermissionResolver::new(&overrides))
            .can_access(roles, module, permission)
    }

    /// Whether any of `roles` may view `module`
    pub fn can_view_module(&self, roles: &[Role], module: Module) -> bool {
        self.can_access(roles, module, Permission::View)
    }

    /// [`can_access`](Self::can_access) over raw role, module and permission labels
    pub fn can_access_str<S: AsRef<str>>(
        &self,
        roles: &[S],
        module: &str,
        permission: &str,
    ) -> bool {
        let overrides = self.overrides.read();
        CapabilityGate::new(PermissionResolver::new(&overrides))
            .can_access_str(roles, module, permission)
    }

    /// [`can_view_module`](Self::can_view_module) over raw labels
    pub fn can_view_module_str<S: AsRef<str>>(&self, roles: &[S], module: &str) -> bool {
        self.can_access_str(roles, module, Permission::View.as_str())
    }

    /// Flip a cell of the matrix and return its new effective value
    pub fn toggle(&self, role: Role, module: Module, permission: Permission) -> Result<bool> {
        let key = PermissionKey::new(role, module, permission);
        let value = self.overrides.write().toggle(key)?;
        tracing::debug!(key = %key, value, "Toggled permission");
        Ok(value)
    }

    /// Set a cell to an explicit value
    pub fn set_override(&self, key: PermissionKey, value: bool) -> Result<()> {
        self.overrides.write().set(key, value)?;
        tracing::debug!(key = %key, value, "Set permission override");
        Ok(())
    }

    /// Drop every override in memory; durable only after [`save`](Self::save)
    pub fn reset_all(&self) {
        let mut overrides = self.overrides.write();
        let cleared = overrides.len();
        *overrides = OverrideStore::new();
        tracing::debug!(cleared, "Reset all permission overrides");
    }

    /// Snapshot of the in-memory overrides
    pub fn overrides(&self) -> OverrideStore {
        self.overrides.read().clone()
    }

    /// Number of in-memory overrides
    pub fn override_count(&self) -> usize {
        self.overrides.read().len()
    }

    /// Administrative matrix for the given role columns
    pub fn matrix(&self, roles: &[Role]) -> PermissionMatrix {
        let overrides = self.overrides.read();
        PermissionMatrix::from_store(&overrides, roles)
    }

    /// Route guard over `menu` redirecting to the configured fallback path
    pub fn route_guard(&self, menu: NavigationMenu) -> RouteGuard {
        RouteGuard::from_config(menu, &self.config)
    }

    /// Whether a load has succeeded at least once
    pub fn is_loaded(&self) -> bool {
        self.persisted.read().loaded
    }

    /// Whether in-memory overrides differ from the last persisted state
    pub fn is_dirty(&self) -> bool {
        let overrides = self.overrides.read();
        *overrides != self.persisted.read().overrides
    }

    /// Revision observed at the last successful load or save
    pub fn revision(&self) -> u64 {
        self.persisted.read().revision
    }

    /// Replace in-memory overrides with the persisted ones
    ///
    /// On failure the in-memory overrides are left as they were and the
    /// error is returned for the caller to report.
    pub async fn load(&self) -> Result<LoadReport> {
        let stored = match self.repository.load_overrides().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to load permission overrides, keeping current state"
                );
                return Err(e);
            }
        };

        let decoded = match OverrideStore::from_json(&stored.payload, self.config.strict_load) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    revision = stored.revision,
                    "Rejected persisted permission overrides"
                );
                return Err(e);
            }
        };

        let report = LoadReport {
            loaded: decoded.store.len(),
            skipped: decoded.skipped,
            normalized: decoded.normalized,
            revision: stored.revision,
        };

        {
            let mut overrides = self.overrides.write();
            let mut persisted = self.persisted.write();
            *overrides = decoded.store.clone();
            *persisted = Persisted {
                overrides: decoded.store,
                revision: stored.revision,
                loaded: true,
            };
        }

        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            revision = report.revision,
            "Loaded permission overrides"
        );
        Ok(report)
    }

    /// Persist the in-memory overrides, rejecting the write if someone else
    /// saved since this session last loaded or saved
    pub async fn save(&self) -> Result<u64> {
        let expected = self.revision();
        self.write(Some(expected)).await
    }

    /// Persist the in-memory overrides unconditionally (last write wins)
    pub async fn force_save(&self) -> Result<u64> {
        self.write(None).await
    }

    async fn write(&self, expected_revision: Option<u64>) -> Result<u64> {
        let snapshot = self.overrides();
        let wire = snapshot.to_wire();

        let revision = match self.repository.save_overrides(&wire, expected_revision).await {
            Ok(revision) => revision,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save permission overrides");
                return Err(e);
            }
        };

        *self.persisted.write() = Persisted {
            overrides: snapshot,
            revision,
            loaded: true,
        };

        tracing::info!(count = wire.len(), revision, "Saved permission overrides");
        Ok(revision)
    }
}
