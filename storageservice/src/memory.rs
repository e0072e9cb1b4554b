// In-memory backend for native targets and tests

use super::{StorageError, TokenBackend};
use std::sync::{Arc, RwLock};

/// In-memory token backend
///
/// Clones share the same slot, so a clone handed to the API client sees
/// tokens stored through the original.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Arc<RwLock<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

impl TokenBackend for MemoryBackend {
    fn get(&self) -> Option<String> {
        match self.slot.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, token: &str) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) {
        match self.slot.write() {
            Ok(mut slot) => *slot = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_token() {
        let backend = MemoryBackend::new();
        let shared = backend.clone();

        backend.set("abc").unwrap();
        assert_eq!(shared.get().as_deref(), Some("abc"));

        shared.remove();
        assert_eq!(backend.get(), None);
    }
}
