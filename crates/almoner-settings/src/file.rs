//! JSON-file settings store
//!
//! All rows live in one JSON document. Writers take an exclusive advisory
//! lock on a sibling `.lock` file for the whole read-check-write, then
//! write a uniquely named temp file and rename it over the document.

use async_trait::async_trait;
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::sync::Mutex;

use crate::error::{Result, SettingsError};
use crate::store::{apply_put, SettingsRow, SettingsStore};

type Document = BTreeMap<String, SettingsRow>;

/// File-backed implementation of [`SettingsStore`]
///
/// Writes are serialised across instances and processes sharing the same
/// path, so a conditional `put` observes every earlier write.
pub struct FileSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

/// Held for the duration of a write; closing the handle releases the lock
struct DocumentLock {
    _file: File,
}

impl FileSettingsStore {
    /// Create a store backed by the file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store using `settings.json` inside `base_path`
    pub fn with_defaults<P: AsRef<Path>>(base_path: P) -> Self {
        Self::new(base_path.as_ref().join("settings.json"))
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the advisory lock file next to the document
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    async fn lock(&self) -> Result<DocumentLock> {
        let dir = self.parent_dir();
        let lock_path = self.lock_path();
        let file = tokio::task::spawn_blocking(move || -> std::io::Result<File> {
            std::fs::create_dir_all(&dir)?;
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(&lock_path)?;
            file.lock_exclusive()?;
            Ok(file)
        })
        .await
        .map_err(|e| SettingsError::Backend(format!("Lock task failed: {}", e)))??;
        Ok(DocumentLock { _file: file })
    }

    async fn read_document(&self) -> Result<Document> {
        if !fs::try_exists(&self.path).await? {
            return Ok(Document::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Document::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_document(&self, document: &Document) -> Result<()> {
        let content = serde_json::to_vec_pretty(document)?;
        let dir = self.parent_dir();
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&content)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path)?;
            Ok(())
        })
        .await
        .map_err(|e| SettingsError::Backend(format!("Write task failed: {}", e)))??;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<SettingsRow>> {
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    async fn put(
        &self,
        key: &str,
        value: serde_json::Value,
        expected_revision: Option<u64>,
    ) -> Result<u64> {
        let _guard = self.write_lock.lock().await;
        let _lock = self.lock().await?;
        let mut document = self.read_document().await?;
        let row = apply_put(document.get(key), key, value, expected_revision)?;
        let revision = row.revision;
        document.insert(key.to_string(), row);
        self.write_document(&document).await?;
        tracing::debug!(key, revision, path = %self.path.display(), "Wrote settings row");
        Ok(revision)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let _lock = self.lock().await?;
        let mut document = self.read_document().await?;
        if document.remove(key).is_some() {
            self.write_document(&document).await?;
        }
        Ok(())
    }
}
