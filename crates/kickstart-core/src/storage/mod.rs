//! Namespaced JSON preferences over a persistent key/value medium.
//!
//! Preferences are non-critical UI state. Reads and writes never fail: a
//! missing or corrupt value falls back to the caller's default, and a failed
//! write is logged and reported as `false`.
//!
//! # Example
//!
//! ```rust,ignore
//! use kickstart_core::storage::{PreferenceStore, memory::MemoryStorage};
//!
//! let store = PreferenceStore::new(MemoryStorage::new(), "kickstart");
//! store.set("theme", &"dark");
//! let theme: String = store.get_or("theme", "light".to_string());
//! ```

pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Result, StorageError};

/// Text key/value medium backing a [`PreferenceStore`].
///
/// Implementations share state between clones, which is why every method
/// takes `&self`.
#[cfg_attr(test, mockall::automock)]
pub trait StorageMedium {
    /// Read a raw value.
    fn get_item(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;

    /// Write a raw value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> std::result::Result<(), StorageError>;

    /// Every key currently stored, across all namespaces.
    fn keys(&self) -> std::result::Result<Vec<String>, StorageError>;
}

impl<T: StorageMedium + ?Sized> StorageMedium for std::rc::Rc<T> {
    fn get_item(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> std::result::Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> std::result::Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

/// Typed preferences stored as JSON under `"{namespace}:{key}"`.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    medium: S,
    namespace: String,
}

impl<S: StorageMedium> PreferenceStore<S> {
    /// Create a store writing into `namespace`.
    pub fn new(medium: S, namespace: impl Into<String>) -> Self {
        Self {
            medium,
            namespace: namespace.into(),
        }
    }

    /// The namespace prefix, without the trailing colon.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The backing medium.
    pub const fn medium(&self) -> &S {
        &self.medium
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}:{key}", self.namespace)
    }

    /// Serialize and write `value`. Returns `false` if the write failed.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => {
                debug!(namespace = %self.namespace, key, "Preference saved");
                true
            }
            Err(e) => {
                warn!(namespace = %self.namespace, key, error = %e, "Failed to save preference");
                false
            }
        }
    }

    fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.medium.set_item(&self.full_key(key), &text)?;
        Ok(())
    }

    /// Read and deserialize `key`. Missing, unreadable or corrupt values yield `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    namespace = %self.namespace,
                    key,
                    error = %e,
                    "Ignoring unreadable preference"
                );
                None
            }
        }
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.medium.get_item(&self.full_key(key))? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Read `key`, falling back to `default`.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Read `key` as an untyped JSON value.
    pub fn get_value(&self, key: &str) -> Option<serde_json::Value> {
        self.get(key)
    }

    /// Whether `key` holds any value, parseable or not.
    pub fn has(&self, key: &str) -> bool {
        match self.medium.get_item(&self.full_key(key)) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!(namespace = %self.namespace, key, error = %e, "Storage read failed");
                false
            }
        }
    }

    /// Keys in this namespace with the prefix stripped. Order is unspecified.
    pub fn keys(&self) -> Vec<String> {
        let prefix = self.full_key("");
        match self.medium.keys() {
            Ok(keys) => keys
                .into_iter()
                .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
                .collect(),
            Err(e) => {
                warn!(namespace = %self.namespace, error = %e, "Storage enumeration failed");
                Vec::new()
            }
        }
    }

    /// Delete `key`. Returns `false` if the medium reported a failure.
    pub fn remove(&self, key: &str) -> bool {
        match self.medium.remove_item(&self.full_key(key)) {
            Ok(()) => true,
            Err(e) => {
                warn!(namespace = %self.namespace, key, error = %e, "Failed to remove preference");
                false
            }
        }
    }

    /// Delete every key in this namespace. Returns how many were removed.
    pub fn clear(&self) -> usize {
        self.keys().iter().filter(|key| self.remove(key)).count()
    }
}
