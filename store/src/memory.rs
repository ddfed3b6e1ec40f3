use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::SessionBackend;
use crate::models::Session;

/// In-memory backend. Used by tests and as the fallback when no durable
/// storage is available; clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    slot: Rc<RefCell<Option<Session>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Option<Session> {
        self.slot.borrow().clone()
    }

    fn save(&self, session: &Session) {
        *self.slot.borrow_mut() = Some(session.clone());
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            subject_id: "1".into(),
            farm_name: "Test Farm".into(),
            email: Some("a@b.c".into()),
            phone: None,
            token: "t".into(),
        }
    }

    #[test]
    fn roundtrip_and_clear() {
        let backend = MemoryBackend::new();
        assert!(backend.load().is_none());

        backend.save(&session());
        assert_eq!(backend.load(), Some(session()));

        backend.clear();
        assert!(backend.load().is_none());

        // Clearing an already-empty backend is fine.
        backend.clear();
        assert!(backend.load().is_none());
    }

    #[test]
    fn clones_share_state() {
        let backend = MemoryBackend::new();
        let other = backend.clone();
        backend.save(&session());
        assert_eq!(other.load(), Some(session()));
    }
}
