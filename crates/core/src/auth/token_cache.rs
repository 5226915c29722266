//! Process-wide application token cache
//!
//! Readers take the read lock on every request; refresh and override take
//! the write lock, so a reader never observes a torn value.

use std::sync::Arc;

use parking_lot::RwLock;

/// Shared slot holding the active application token
#[derive(Clone, Default)]
pub struct AppTokenCache {
    inner: Arc<RwLock<Option<String>>>,
}

impl AppTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, if one has been fetched or set
    pub fn get(&self) -> Option<String> {
        self.inner.read().clone()
    }

    /// Replace the token; an empty string clears it
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        *self.inner.write() = if token.is_empty() { None } else { Some(token) };
    }

    pub fn clear(&self) {
        *self.inner.write() = None;
    }

    pub fn is_set(&self) -> bool {
        self.inner.read().is_some()
    }
}

impl std::fmt::Debug for AppTokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTokenCache").field("is_set", &self.is_set()).finish()
    }
}
