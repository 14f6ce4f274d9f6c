//! Permissions System for Almoner
//!
//! Role-based access control for the administrative application: a
//! compiled default policy, administrator overrides persisted in the
//! settings store, and OR-aggregation across a user's roles for
//! navigation, route guards and action buttons.
//!
//! ```ignore
//! use almoner_permissions::{Module, PermissionService, PermissionsConfig, Role};
//! use almoner_settings::InMemorySettingsStore;
//! use std::sync::Arc;
//!
//! let service = PermissionService::with_settings_store(
//!     Arc::new(InMemorySettingsStore::new()),
//!     PermissionsConfig::default(),
//! );
//! service.load().await?;
//! if service.can_view_module(&[Role::Fundraiser], Module::Campaigns) {
//!     // render the Campaigns entry
//! }
//! ```

pub mod config;
pub mod error;
pub mod matrix;
pub mod navigation;
pub mod permission;
pub mod service;
pub mod storage;

pub use config::PermissionsConfig;
pub use error::{Error, Result};
pub use matrix::{MatrixCell, MatrixRow, PermissionMatrix};
pub use navigation::{ModuleAccess, NavItem, NavigationMenu, RouteDecision, RouteGuard};
pub use permission::{
    default_permission, parse_roles, CapabilityGate, DecisionSource, Module, OverrideStore,
    Permission, PermissionKey, PermissionResolver, Role,
};
pub use service::{LoadReport, PermissionService};
pub use storage::{
    OverrideRepository, SettingsOverrideRepository, StoredOverrides, OVERRIDES_SETTINGS_KEY,
};
