//! Wire types for the backend API.
//!
//! Deserialization is deliberately tolerant: every field that a misbehaving
//! backend could omit is an `Option`, and the session layer decides whether
//! a partial response is usable. Secrets (passwords, codes, tokens) only
//! appear in request types, which are serialized and sent, never logged.

use serde::{Deserialize, Serialize};

/// Which kind of identifier the user typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    Email,
    Phone,
}

/// Payload for `POST /user/login/`.
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub password: String,
}

impl LoginRequest {
    pub fn new(kind: IdentifierKind, identifier: &str, password: &str) -> Self {
        let (email, phone_number) = match kind {
            IdentifierKind::Email => (Some(identifier.to_string()), None),
            IdentifierKind::Phone => (None, Some(identifier.to_string())),
        };
        Self {
            email,
            phone_number,
            password: password.to_string(),
        }
    }
}

/// Payload for `POST /user/register/`.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    pub farm_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(farm_name: &str, kind: IdentifierKind, identifier: &str, password: &str) -> Self {
        let (email, phone_number) = match kind {
            IdentifierKind::Email => (Some(identifier.to_string()), None),
            IdentifierKind::Phone => (None, Some(identifier.to_string())),
        };
        Self {
            farm_name: farm_name.to_string(),
            email,
            phone_number,
            password: password.to_string(),
        }
    }
}

/// Account ids arrive as numbers from some endpoints and strings from
/// others; normalize at the edge.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SubjectId {
    Number(u64),
    Text(String),
}

impl SubjectId {
    pub fn as_string(&self) -> String {
        match self {
            SubjectId::Number(n) => n.to_string(),
            SubjectId::Text(s) => s.clone(),
        }
    }
}

/// The account object embedded in login/register responses.
#[derive(Clone, Debug, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub id: Option<SubjectId>,
    #[serde(default, alias = "username")]
    pub farm_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Response to `POST /user/login/`.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    /// The credential token. The backend calls it `key`.
    #[serde(default, alias = "key")]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AccountInfo>,
}

/// Response to `POST /user/register/`. The token is only present when the
/// backend issues one immediately; most deployments require channel
/// verification first.
#[derive(Clone, Debug, Deserialize)]
pub struct RegisterResponse {
    #[serde(default, alias = "key")]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AccountInfo>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Plain acknowledgement, DRF-style.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_serializes_only_the_chosen_identifier() {
        let req = LoginRequest::new(IdentifierKind::Phone, "+15551234567", "hunter22");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["phone_number"], "+15551234567");
        assert_eq!(value["password"], "hunter22");
        assert!(value.get("email").is_none());
    }

    #[test]
    fn login_response_accepts_key_alias_and_numeric_id() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"key": "tok-1", "user": {"id": 42, "username": "Green Acres"}}"#,
        )
        .unwrap();
        assert_eq!(resp.token.as_deref(), Some("tok-1"));
        let user = resp.user.unwrap();
        assert_eq!(user.id.unwrap().as_string(), "42");
        assert_eq!(user.farm_name.as_deref(), Some("Green Acres"));
    }

    #[test]
    fn register_response_tolerates_bare_detail() {
        let resp: RegisterResponse =
            serde_json::from_str(r#"{"detail": "Verification e-mail sent."}"#).unwrap();
        assert!(resp.token.is_none());
        assert!(resp.user.is_none());
        assert_eq!(resp.detail.as_deref(), Some("Verification e-mail sent."));
    }
}
