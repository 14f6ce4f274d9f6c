//! Permission management module

pub mod defaults;
pub mod gate;
pub mod models;
pub mod overrides;
pub mod resolver;

pub use defaults::{default_for, default_permission, default_permission_str};
pub use gate::{parse_roles, CapabilityGate};
pub use models::{Module, Permission, PermissionKey, Role};
pub use overrides::{DecodedOverrides, OverrideStore, WireOverrides};
pub use resolver::{DecisionSource, PermissionResolver};
