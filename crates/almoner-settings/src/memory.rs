//! In-memory settings store
//!
//! Memory backend for tests and single-process deployments

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Result, SettingsError};
use crate::store::{apply_put, SettingsRow, SettingsStore};

/// Thread-safe in-memory implementation of [`SettingsStore`]
///
/// Uses RwLock for concurrent read access with exclusive write access.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    rows: RwLock<HashMap<String, SettingsRow>>,
    unavailable: AtomicBool,
}

impl InMemorySettingsStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial rows (useful for testing)
    pub fn with_rows(rows: Vec<SettingsRow>) -> Self {
        let map = rows.into_iter().map(|r| (r.key.clone(), r)).collect();
        Self {
            rows: RwLock::new(map),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Get the current count of rows (for testing)
    pub fn count(&self) -> usize {
        self.rows.read().len()
    }

    /// Simulate an outage: every call fails with a backend error (for testing)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SettingsError::Backend("settings store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<SettingsRow>> {
        self.check_available()?;
        Ok(self.rows.read().get(key).cloned())
    }

    async fn put(
        &self,
        key: &str,
        value: serde_json::Value,
        expected_revision: Option<u64>,
    ) -> Result<u64> {
        self.check_available()?;
        let mut rows = self.rows.write();
        let row = apply_put(rows.get(key), key, value, expected_revision)?;
        let revision = row.revision;
        rows.insert(key.to_string(), row);
        Ok(revision)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.check_available()?;
        self.rows.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = InMemorySettingsStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemorySettingsStore::new();
        let revision = store.put("k", json!({"a": true}), None).await.unwrap();
        assert_eq!(revision, 1);

        let row = store.get("k").await.unwrap().unwrap();
        assert_eq!(row.value, json!({"a": true}));
        assert_eq!(row.revision, 1);
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn test_conditional_put() {
        let store = InMemorySettingsStore::new();
        assert_eq!(store.put("k", json!(1), Some(0)).await.unwrap(), 1);
        assert_eq!(store.put("k", json!(2), Some(1)).await.unwrap(), 2);

        let err = store.put("k", json!(3), Some(1)).await.unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Conflict { expected: 1, actual: 2, .. }
        ));

        // Rejected write leaves the row untouched
        let row = store.get("k").await.unwrap().unwrap();
        assert_eq!(row.value, json!(2));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemorySettingsStore::new();
        store.put("k", json!(1), None).await.unwrap();
        store.delete("k").await.unwrap();
        store.delete("k").await.unwrap();
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn test_unavailable() {
        let store = InMemorySettingsStore::new();
        store.set_unavailable(true);
        assert!(matches!(store.get("k").await, Err(SettingsError::Backend(_))));
        assert!(store.put("k", json!(1), None).await.is_err());

        store.set_unavailable(false);
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_with_rows() {
        let store = InMemorySettingsStore::with_rows(vec![SettingsRow::new("a", json!(1))]);
        let row = store.get("a").await.unwrap().unwrap();
        assert_eq!(row.revision, 1);
    }
}
