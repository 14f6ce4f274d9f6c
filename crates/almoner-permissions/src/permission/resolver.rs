//! Effective permission resolution
//!
//! Overrides win over the compiled default; `super_admin` always resolves
//! to true regardless of what the override store contains.

use crate::permission::defaults::default_for;
use crate::permission::models::{Module, Permission, PermissionKey, Role};
use crate::permission::overrides::OverrideStore;

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// The role is exempt from overrides
    Unrestricted,
    /// An administrative override
    Override,
    /// The compiled default policy
    Default,
}

impl std::fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionSource::Unrestricted => write!(f, "unrestricted"),
            DecisionSource::Override => write!(f, "override"),
            DecisionSource::Default => write!(f, "default"),
        }
    }
}

/// Read-only view merging overrides over defaults
#[derive(Debug, Clone, Copy)]
pub struct PermissionResolver<'a> {
    overrides: &'a OverrideStore,
}

impl<'a> PermissionResolver<'a> {
    /// Create a resolver over an override store
    pub fn new(overrides: &'a OverrideStore) -> Self {
        Self { overrides }
    }

    /// Effective value of a triple
    pub fn resolve(&self, role: Role, module: Module, permission: Permission) -> bool {
        self.resolve_key(&PermissionKey::new(role, module, permission))
    }

    /// Effective value of a key
    pub fn resolve_key(&self, key: &PermissionKey) -> bool {
        self.explain(key).0
    }

    /// Effective value together with its source
    pub fn explain(&self, key: &PermissionKey) -> (bool, DecisionSource) {
        if !key.role.is_overridable() {
            return (true, DecisionSource::Unrestricted);
        }
        match self.overrides.get(key) {
            Some(value) => (value, DecisionSource::Override),
            None => (default_for(key), DecisionSource::Default),
        }
    }

    /// Whether an override is stored for the triple
    pub fn is_overridden(&self, role: Role, module: Module, permission: Permission) -> bool {
        self.overrides
            .contains(&PermissionKey::new(role, module, permission))
    }
}
