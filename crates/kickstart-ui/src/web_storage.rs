//! `localStorage` as a preference medium.

use kickstart_core::StorageError;
use kickstart_core::StorageMedium;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::{WebError, js_error_message, js_error_name};

/// The window's `localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the window's local storage.
    ///
    /// Fails when storage is disabled, e.g. in some private browsing modes.
    pub fn open() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(WebError::StorageUnavailable(
                "localStorage is disabled".to_string(),
            )),
            Err(e) => Err(WebError::StorageUnavailable(js_error_message(&e))),
        }
    }
}

fn backend(e: &JsValue) -> StorageError {
    StorageError::Backend(js_error_message(e))
}

fn write_error(key: &str, e: &JsValue) -> StorageError {
    match js_error_name(e).as_deref() {
        Some("QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED") => StorageError::QuotaExceeded {
            key: key.to_string(),
        },
        _ => backend(e),
    }
}

impl StorageMedium for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| backend(&e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| write_error(key, &e))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(|e| backend(&e))
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let len = self.storage.length().map_err(|e| backend(&e))?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = self.storage.key(index).map_err(|e| backend(&e))? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
