//! # Browser `localStorage` session storage
//!
//! [`LocalStorageBackend`] is the web implementation of
//! [`SessionBackend`]. The session is stored as JSON under the single
//! well-known key [`SESSION_KEY`](crate::SESSION_KEY), which keeps the
//! browser's storage inspector honest about everything this app persists.
//!
//! All operations silently degrade: a missing window, disabled storage, or
//! corrupted value reads as "no session" instead of crashing the UI.

use crate::backend::{SessionBackend, SESSION_KEY};
use crate::models::Session;

/// `localStorage`-backed session storage for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionBackend for LocalStorageBackend {
    fn load(&self) -> Option<Session> {
        let raw = Self::storage()?.get_item(SESSION_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    fn save(&self, session: &Session) {
        let Ok(raw) = serde_json::to_string(session) else {
            return;
        };
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(SESSION_KEY, &raw);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}
