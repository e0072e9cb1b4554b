// LocalStorage backend implementation (wasm32 only)

use super::{decode_stored_token, StorageError, TokenBackend};
use drowsiness_monitor_core::AUTH_TOKEN_KEY;
use gloo_storage::{LocalStorage, Storage};

/// LocalStorage backend for browser-based storage
///
/// The token lives under `localStorage["authToken"]` as a plain string, the
/// same form other scripts on the page read with `getItem`. It is re-read on
/// every call so another tab logging out is noticed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }
}

impl TokenBackend for LocalStorageBackend {
    fn get(&self) -> Option<String> {
        let stored = LocalStorage::raw().get_item(AUTH_TOKEN_KEY).ok().flatten();
        decode_stored_token(stored)
    }

    fn set(&self, token: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(AUTH_TOKEN_KEY, token)
            .map_err(|e| StorageError::WriteFailed(format!("{:?}", e)))
    }

    fn remove(&self) {
        if let Err(e) = LocalStorage::raw().remove_item(AUTH_TOKEN_KEY) {
            tracing::debug!(error = ?e, "failed to remove stored token");
        }
    }
}
