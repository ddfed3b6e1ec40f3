//! # File-backed session storage
//!
//! [`FileBackend`] persists the session as a TOML file so desktop builds
//! stay logged in across restarts. The file lives at
//! `<base_dir>/chavfana-session.toml`; callers pick the base via
//! `dirs::data_dir()`-style discovery:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/chavfana/` |
//! | Linux | `~/.local/share/chavfana/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\chavfana\` |

use std::path::PathBuf;

use crate::backend::{SessionBackend, SESSION_KEY};
use crate::models::Session;

/// Filesystem-backed session storage for native platforms.
#[derive(Clone, Debug)]
pub struct FileBackend {
    base: PathBuf,
}

impl FileBackend {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn path(&self) -> PathBuf {
        self.base.join(format!("{SESSION_KEY}.toml"))
    }
}

impl SessionBackend for FileBackend {
    fn load(&self) -> Option<Session> {
        let text = std::fs::read_to_string(self.path()).ok()?;
        Session::from_toml(&text).ok()
    }

    fn save(&self, session: &Session) {
        let Ok(text) = session.to_toml() else {
            return;
        };
        let _ = std::fs::create_dir_all(&self.base);
        let _ = std::fs::write(self.path(), text);
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(self.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_on_disk() {
        let dir = std::env::temp_dir().join(format!("chavfana_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let backend = FileBackend::new(dir.clone());
        assert!(backend.load().is_none());

        let session = Session {
            subject_id: "9".into(),
            farm_name: "Orchard".into(),
            email: None,
            phone: Some("+15550001111".into()),
            token: "tok-xyz".into(),
        };
        backend.save(&session);

        // Re-open from the same directory.
        let reopened = FileBackend::new(dir.clone());
        assert_eq!(reopened.load(), Some(session));

        backend.clear();
        assert!(reopened.load().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupted_file_reads_as_none() {
        let dir = std::env::temp_dir().join(format!("chavfana_corrupt_{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        std::fs::write(dir.join(format!("{SESSION_KEY}.toml")), "not = [valid").unwrap();

        let backend = FileBackend::new(dir.clone());
        assert!(backend.load().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
