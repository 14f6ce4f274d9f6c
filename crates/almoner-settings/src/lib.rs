//! Almoner Settings Store
//!
//! Key-value rows holding JSON values, used by the application for
//! site-wide settings such as persisted permission overrides.
//!
//! Every row carries a `revision` that increases by one on each write.
//! Writers may pass the revision they last observed to get a
//! compare-and-swap instead of a blind overwrite.
//!
//! ## Backends
//!
//! - [`InMemorySettingsStore`]: thread-safe map, for tests and embedding
//! - [`FileSettingsStore`]: a single JSON document on disk
//!
//! ## Usage
//!
//! ```ignore
//! use almoner_settings::{InMemorySettingsStore, SettingsStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn SettingsStore> = Arc::new(InMemorySettingsStore::new());
//! let revision = store.put("site_name", serde_json::json!("Helping Hands"), Some(0)).await?;
//! assert_eq!(revision, 1);
//! ```

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::{Result, SettingsError};
pub use file::FileSettingsStore;
pub use memory::InMemorySettingsStore;
pub use store::{SettingsRow, SettingsStore};
