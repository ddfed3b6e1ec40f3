//! # Client-side session model
//!
//! [`Session`] is the one piece of state this app persists on the client.
//! It exists only after a successful login (or a registration that issued a
//! token immediately) and is destroyed on logout or when the backend rejects
//! the token. Everything else — verification challenges, recovery contexts —
//! lives in memory for the duration of a flow and is never written to disk.

use serde::{Deserialize, Serialize};

/// The authenticated identity, exactly as the session store owns it.
///
/// Invariant: a `Session` is only constructed with a non-empty `subject_id`
/// and `token`. Either contact identifier may be absent depending on which
/// channel the account was registered with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub subject_id: String,
    pub farm_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub token: String,
}

impl Session {
    /// The identifier shown in the header: email if present, else phone.
    pub fn contact(&self) -> Option<&str> {
        self.email.as_deref().or(self.phone.as_deref())
    }

    /// Parse from the TOML the file backend writes.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML for the file backend.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_roundtrip_without_phone() {
        let session = Session {
            subject_id: "42".into(),
            farm_name: "Green Acres".into(),
            email: Some("farmer@example.com".into()),
            phone: None,
            token: "tok-abc".into(),
        };

        let text = session.to_toml().unwrap();
        let back = Session::from_toml(&text).unwrap();
        assert_eq!(back, session);
        assert_eq!(back.contact(), Some("farmer@example.com"));
    }

    #[test]
    fn contact_falls_back_to_phone() {
        let session = Session {
            subject_id: "7".into(),
            farm_name: "Hillside".into(),
            email: None,
            phone: Some("+15551234567".into()),
            token: "tok".into(),
        };
        assert_eq!(session.contact(), Some("+15551234567"));
    }
}
