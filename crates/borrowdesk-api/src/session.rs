//! Session Storage
//!
//! The bearer token is the only piece of state shared by every request.
//! Reads and writes go through `SessionStore` so the gateway never touches
//! browser storage directly.

use std::sync::Mutex;

/// Local storage key holding the bearer token
pub const TOKEN_STORAGE_KEY: &str = "auth_token";

/// Where the bearer token lives
pub trait SessionStore: Send + Sync {
    /// Current token, `None` when signed out
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: &str);

    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Token persisted in the browser's `localStorage`.
///
/// Holds no handle: the storage object is looked up on every call, so the
/// store stays `Send + Sync` and survives page reloads.
#[derive(Debug, Clone)]
pub struct LocalStorageSession {
    key: &'static str,
}

impl LocalStorageSession {
    pub fn new() -> Self {
        Self { key: TOKEN_STORAGE_KEY }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl Default for LocalStorageSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for LocalStorageSession {
    fn token(&self) -> Option<String> {
        let storage = Self::storage()?;
        storage
            .get_item(self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn set_token(&self, token: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(self.key, token).is_err() {
                    tracing::warn!("could not persist session token");
                }
            }
            None => tracing::warn!("local storage unavailable, session token not persisted"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(self.key);
        }
    }
}

/// In-process token, for tests and non-browser callers
#[derive(Debug, Default)]
pub struct MemorySession {
    token: Mutex<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_string())) }
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .filter(|token| !token.is_empty())
    }

    fn set_token(&self, token: &str) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_session_lifecycle() {
        let session = MemorySession::new();
        assert!(!session.is_authenticated());

        session.set_token("abc123");
        assert_eq!(session.token().as_deref(), Some("abc123"));

        session.clear();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_empty_token_counts_as_signed_out() {
        let session = MemorySession::with_token("");
        assert!(!session.is_authenticated());
    }
}
