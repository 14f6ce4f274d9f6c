//! Permission engine configuration

use serde::{Deserialize, Serialize};

/// Configuration for [`PermissionService`](crate::PermissionService)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Reject the whole persisted payload when any entry is invalid
    pub strict_load: bool,
    /// Path unauthorized routes redirect to
    pub fallback_path: String,
}

impl PermissionsConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self {
            strict_load: true,
            fallback_path: "/dashboard".to_string(),
        }
    }

    /// Configuration that skips invalid persisted entries instead of failing
    pub fn lenient() -> Self {
        Self {
            strict_load: false,
            ..Self::new()
        }
    }
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self::new()
    }
}
