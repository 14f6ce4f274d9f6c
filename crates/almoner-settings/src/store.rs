//! Settings row model and store interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One key-value settings row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsRow {
    /// Well-known settings key
    pub key: String,
    /// Arbitrary JSON payload
    pub value: serde_json::Value,
    /// Write counter, starting at 1 for the first write
    pub revision: u64,
    /// Time of the last write
    pub updated_at: DateTime<Utc>,
}

impl SettingsRow {
    /// Create a row at its first revision
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
            revision: 1,
            updated_at: Utc::now(),
        }
    }

    /// Produce the successor row holding `value`
    pub fn next(&self, value: serde_json::Value) -> Self {
        Self {
            key: self.key.clone(),
            value,
            revision: self.revision + 1,
            updated_at: Utc::now(),
        }
    }
}

/// External key-value settings store
///
/// Revisions start at 0 for an absent row. A `put` with
/// `expected_revision = Some(r)` succeeds only when the current revision
/// is `r`; `None` overwrites unconditionally.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch a row, `None` when the key has never been written
    async fn get(&self, key: &str) -> Result<Option<SettingsRow>>;

    /// Write a row and return its new revision
    async fn put(
        &self,
        key: &str,
        value: serde_json::Value,
        expected_revision: Option<u64>,
    ) -> Result<u64>;

    /// Remove a row; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Apply a write to an optional current row, enforcing the revision check
pub(crate) fn apply_put(
    current: Option<&SettingsRow>,
    key: &str,
    value: serde_json::Value,
    expected_revision: Option<u64>,
) -> Result<SettingsRow> {
    let actual = current.map(|row| row.revision).unwrap_or(0);
    if let Some(expected) = expected_revision {
        if expected != actual {
            return Err(crate::error::SettingsError::conflict(key, expected, actual));
        }
    }
    Ok(match current {
        Some(row) => row.next(value),
        None => SettingsRow::new(key, value),
    })
}
