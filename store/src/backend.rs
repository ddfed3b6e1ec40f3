//! Storage backend abstraction for the persisted session.
//!
//! The session store works against [`SessionBackend`], so the same logic
//! runs on the web (browser `localStorage`), on native (a file under the
//! platform data directory), and in tests (in-memory). Backends are
//! infallible at the API level: a corrupted or unavailable store degrades to
//! "no session" rather than surfacing an error into the UI, the same
//! resilience posture the rest of the persistence layer takes.

use crate::models::Session;

/// The single well-known key all backends store the session under.
pub const SESSION_KEY: &str = "chavfana-session";

/// Where the session survives reloads. One implementation per platform.
pub trait SessionBackend {
    /// Read the persisted session, if any. Unreadable data is `None`.
    fn load(&self) -> Option<Session>;

    /// Persist the session, replacing any previous one.
    fn save(&self, session: &Session);

    /// Remove the persisted session. Must succeed with no network and no
    /// session present.
    fn clear(&self);
}
