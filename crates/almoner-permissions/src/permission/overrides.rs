//! Administrative overrides of the default policy
//!
//! The store only ever holds entries that differ from the compiled
//! default: writing a default-equal value removes the entry instead.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::permission::defaults::default_for;
use crate::permission::models::PermissionKey;
use crate::permission::resolver::PermissionResolver;

/// Wire form of the override map
pub type WireOverrides = BTreeMap<String, bool>;

/// Sparse map of permission keys to their overridden value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideStore {
    entries: HashMap<PermissionKey, bool>,
}

/// Outcome of decoding a wire payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedOverrides {
    pub store: OverrideStore,
    /// Raw keys that were rejected (lenient decoding only)
    pub skipped: Vec<String>,
    /// Entries dropped because they matched the default
    pub normalized: usize,
}

impl OverrideStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Overridden value for a key, if any
    pub fn get(&self, key: &PermissionKey) -> Option<bool> {
        self.entries.get(key).copied()
    }

    /// Whether the key has an override
    pub fn contains(&self, key: &PermissionKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or update an override
    ///
    /// A value equal to the default removes the entry. Keys for roles that
    /// cannot be overridden are rejected.
    pub fn set(&mut self, key: PermissionKey, value: bool) -> Result<()> {
        if !key.role.is_overridable() {
            return Err(Error::ImmutableRole(key.role.to_string()));
        }
        if value == default_for(&key) {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
        Ok(())
    }

    /// Remove an override, returning its value if one existed
    pub fn remove(&mut self, key: &PermissionKey) -> Option<bool> {
        self.entries.remove(key)
    }

    /// Remove every override
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Flip the effective value of a key and return the new value
    pub fn toggle(&mut self, key: PermissionKey) -> Result<bool> {
        if !key.role.is_overridable() {
            return Err(Error::ImmutableRole(key.role.to_string()));
        }
        let current = PermissionResolver::new(self).resolve_key(&key);
        if current == default_for(&key) {
            self.entries.insert(key, !current);
        } else {
            self.entries.remove(&key);
        }
        Ok(!current)
    }

    /// Number of overrides
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no overrides
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over overrides in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&PermissionKey, &bool)> {
        self.entries.iter()
    }

    /// Encode for persistence
    pub fn to_wire(&self) -> WireOverrides {
        self.entries
            .iter()
            .map(|(key, value)| (key.encode(), *value))
            .collect()
    }

    /// Decode a persisted JSON object
    ///
    /// With `strict`, the first bad entry fails the whole decode. Otherwise
    /// bad entries are collected in [`DecodedOverrides::skipped`].
    pub fn from_json(value: &serde_json::Value, strict: bool) -> Result<DecodedOverrides> {
        let object = value.as_object().ok_or_else(|| {
            Error::MalformedOverrides(format!("expected a JSON object, found {}", kind(value)))
        })?;

        let mut decoded = DecodedOverrides::default();
        for (raw, value) in object {
            match decode_entry(raw, value) {
                Ok((key, flag)) => {
                    if flag == default_for(&key) {
                        decoded.normalized += 1;
                    } else {
                        decoded.store.entries.insert(key, flag);
                    }
                }
                Err(e) if strict => {
                    return Err(Error::MalformedOverrides(format!("'{}': {}", raw, e)));
                }
                Err(e) => {
                    tracing::warn!(key = %raw, error = %e, "Skipping invalid permission override");
                    decoded.skipped.push(raw.clone());
                }
            }
        }
        Ok(decoded)
    }
}

fn decode_entry(raw: &str, value: &serde_json::Value) -> Result<(PermissionKey, bool)> {
    let key: PermissionKey = raw.parse()?;
    if !key.role.is_overridable() {
        return Err(Error::ImmutableRole(key.role.to_string()));
    }
    let flag = value
        .as_bool()
        .ok_or_else(|| {
            Error::MalformedOverrides(format!("expected a boolean, found {}", kind(value)))
        })?;
    Ok((key, flag))
}

fn kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
