//! Storage integration for permission overrides
//!
//! Overrides live as one JSON object under a fixed key in the
//! application's key-value settings store.

use async_trait::async_trait;
use std::sync::Arc;

use almoner_settings::{SettingsError, SettingsStore};

use crate::error::{Error, Result};
use crate::permission::WireOverrides;

/// Settings key holding the override blob
pub const OVERRIDES_SETTINGS_KEY: &str = "permission_overrides";

/// Raw persisted payload and the revision it was read at
#[derive(Debug, Clone, PartialEq)]
pub struct StoredOverrides {
    pub payload: serde_json::Value,
    /// 0 when nothing has been persisted yet
    pub revision: u64,
}

/// Repository trait for storing and retrieving overrides
#[async_trait]
pub trait OverrideRepository: Send + Sync {
    /// Fetch the persisted overrides
    async fn load_overrides(&self) -> Result<StoredOverrides>;

    /// Replace the persisted overrides and return the new revision
    ///
    /// `expected_revision` of `None` overwrites unconditionally.
    async fn save_overrides(
        &self,
        overrides: &WireOverrides,
        expected_revision: Option<u64>,
    ) -> Result<u64>;
}

/// Override repository backed by a [`SettingsStore`]
pub struct SettingsOverrideRepository {
    store: Arc<dyn SettingsStore>,
}

impl SettingsOverrideRepository {
    /// Create a repository over a settings store
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OverrideRepository for SettingsOverrideRepository {
    async fn load_overrides(&self) -> Result<StoredOverrides> {
        let row = self
            .store
            .get(OVERRIDES_SETTINGS_KEY)
            .await
            .map_err(|e| Error::LoadFailed(e.to_string()))?;

        Ok(match row {
            Some(row) => StoredOverrides {
                payload: row.value,
                revision: row.revision,
            },
            None => StoredOverrides {
                payload: serde_json::Value::Object(serde_json::Map::new()),
                revision: 0,
            },
        })
    }

    async fn save_overrides(
        &self,
        overrides: &WireOverrides,
        expected_revision: Option<u64>,
    ) -> Result<u64> {
        let payload = serde_json::to_value(overrides)?;
        self.store
            .put(OVERRIDES_SETTINGS_KEY, payload, expected_revision)
            .await
            .map_err(|e| match e {
                SettingsError::Conflict {
                    expected, actual, ..
                } => Error::StaleRevision { expected, actual },
                other => Error::SaveFailed(other.to_string()),
            })
    }
}
