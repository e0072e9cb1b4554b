// Storage service library for the Drowsiness Monitor
//
// This crate keeps the bearer token on the client side with pluggable
// backends and exposes it to the API client as a TokenProvider.

use drowsiness_monitor_core::{non_empty, TokenProvider};
use serde_json::Value;

#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageBackend;
pub use memory::MemoryBackend;

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Backend refused the write (quota, private mode, ...)
    #[error("トークンの保存に失敗しました: {0}")]
    WriteFailed(String),

    /// Login response carried no token
    #[error("ログインレスポンスにトークンがありません")]
    MissingToken,
}

/// Interpret a raw `authToken` storage entry
///
/// Tokens are stored as plain strings. An entry that is a JSON string
/// literal (`"abc"`, as written by JSON-encoding storage helpers) is
/// unquoted so the quotes never end up in the `Authorization` header.
pub fn decode_stored_token(stored: Option<String>) -> Option<String> {
    let stored = stored?;
    let token = if stored.len() >= 2 && stored.starts_with('"') && stored.ends_with('"') {
        serde_json::from_str::<String>(&stored).unwrap_or(stored)
    } else {
        stored
    };
    non_empty(Some(token))
}

/// Token backend trait
pub trait TokenBackend {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> Result<(), StorageError>;
    fn remove(&self);
}

/// Token store with pluggable backend
#[derive(Debug, Clone, Default)]
pub struct TokenStore<B: TokenBackend> {
    backend: B,
}

impl<B: TokenBackend> TokenStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn store(&self, token: &str) -> Result<(), StorageError> {
        self.backend.set(token)
    }

    /// Store the `token` field of a `/auth/login` response
    pub fn store_from_login(&self, response: &Value) -> Result<(), StorageError> {
        let token = response
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(StorageError::MissingToken)?;
        self.store(token)?;
        tracing::debug!("stored bearer token from login response");
        Ok(())
    }

    /// Forget the token (logout)
    pub fn clear(&self) {
        self.backend.remove();
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }
}

impl<B: TokenBackend> TokenProvider for TokenStore<B> {
    fn token(&self) -> Option<String> {
        non_empty(self.backend.get())
    }
}
