//! # Gateway — the identity and verification API client
//!
//! One method per backend operation. Each method sends the request, maps the
//! HTTP outcome onto [`GatewayError`], and returns the parsed body. No
//! session state lives here; the client can be cloned freely (it is a thin
//! wrapper around a shared `reqwest::Client`).

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::json;

use crate::error::GatewayError;
use crate::types::{Ack, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

/// Production backend. Override with the `CHAVFANA_API_URL` build-time env
/// var for staging builds.
pub const DEFAULT_API_URL: &str = "https://chavfana.com/api";

/// Stateless HTTP client for the Chavfana backend.
#[derive(Clone, Debug)]
pub struct Gateway {
    base_url: String,
    http: reqwest::Client,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Base URL from the build environment, falling back to production.
    pub fn from_env() -> Self {
        Self::new(option_env!("CHAVFANA_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, GatewayError> {
        self.http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))
    }

    pub(crate) async fn get_authed(
        &self,
        path: &str,
        token: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        self.http
            .get(self.url(path))
            .header("Authorization", format!("Token {token}"))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))
    }

    pub(crate) async fn post_authed<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<reqwest::Response, GatewayError> {
        self.http
            .post(self.url(path))
            .header("Authorization", format!("Token {token}"))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))
    }

    // --- Login & registration -------------------------------------------

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, GatewayError> {
        let resp = self.post("/user/login/", req).await?;
        let status = resp.status();
        if status.is_success() {
            resp.json()
                .await
                .map_err(|e| GatewayError::Unexpected(e.to_string()))
        } else {
            tracing::warn!(status = %status, "login rejected");
            Err(credential_error(status))
        }
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, GatewayError> {
        let resp = self.post("/user/register/", req).await?;
        let status = resp.status();
        if status.is_success() {
            resp.json()
                .await
                .map_err(|e| GatewayError::Unexpected(e.to_string()))
        } else {
            tracing::warn!(status = %status, "registration rejected");
            Err(credential_error(status))
        }
    }

    // --- Email verification ---------------------------------------------

    /// Exchange the opaque key from a confirmation link.
    pub async fn confirm_email(&self, key: &str) -> Result<Ack, GatewayError> {
        let resp = self
            .post(&format!("/account-confirm-email/{key}/"), &json!({}))
            .await?;
        ack_or_challenge_error(resp).await
    }

    pub async fn resend_email(&self, email: &str) -> Result<Ack, GatewayError> {
        let resp = self.post("/resend-email/", &json!({ "email": email })).await?;
        ack_or_challenge_error(resp).await
    }

    // --- Phone verification ---------------------------------------------

    pub async fn send_phone_code(&self, phone: &str) -> Result<Ack, GatewayError> {
        let resp = self
            .post("/user/send-sms/", &json!({ "phone_number": phone }))
            .await?;
        ack_or_challenge_error(resp).await
    }

    pub async fn confirm_phone(&self, phone: &str, code: &str) -> Result<Ack, GatewayError> {
        let resp = self
            .post(
                "/user/verify-phone/",
                &json!({ "phone_number": phone, "verification_code": code }),
            )
            .await?;
        ack_or_challenge_error(resp).await
    }

    // --- Password recovery ----------------------------------------------

    pub async fn initiate_reset_by_email(&self, email: &str) -> Result<Ack, GatewayError> {
        let resp = self
            .post("/user/password-reset/", &json!({ "email": email }))
            .await?;
        ack_or_challenge_error(resp).await
    }

    pub async fn initiate_reset_by_phone(&self, phone: &str) -> Result<Ack, GatewayError> {
        let resp = self
            .post("/user/password-reset/sms/", &json!({ "phone_number": phone }))
            .await?;
        ack_or_challenge_error(resp).await
    }

    pub async fn verify_reset_code(&self, phone: &str, code: &str) -> Result<Ack, GatewayError> {
        let resp = self
            .post(
                "/user/password-reset/verify-otp/",
                &json!({ "phone_number": phone, "verification_code": code }),
            )
            .await?;
        ack_or_challenge_error(resp).await
    }

    /// Phone branch: the already-verified code accompanies the new password.
    pub async fn confirm_reset_by_phone(
        &self,
        phone: &str,
        code: &str,
        new_password: &str,
    ) -> Result<Ack, GatewayError> {
        let resp = self
            .post(
                "/user/password-reset/otp-confirm/",
                &json!({
                    "phone_number": phone,
                    "verification_code": code,
                    "password": new_password,
                }),
            )
            .await?;
        ack_or_challenge_error(resp).await
    }

    /// Email branch: uid and token come from the reset link.
    pub async fn confirm_reset_by_email(
        &self,
        uid: &str,
        token: &str,
        new_password: &str,
    ) -> Result<Ack, GatewayError> {
        let resp = self
            .post(
                "/user/password-reset/confirm/",
                &json!({ "uid": uid, "token": token, "password": new_password }),
            )
            .await?;
        ack_or_challenge_error(resp).await
    }
}

async fn ack_or_challenge_error(resp: reqwest::Response) -> Result<Ack, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        // Some ack endpoints return an empty body.
        Ok(resp.json::<Ack>().await.unwrap_or_default())
    } else {
        tracing::warn!(status = %status, "challenge call rejected");
        Err(challenge_error(status))
    }
}

/// Status mapping for login/registration-shaped calls.
fn credential_error(status: StatusCode) -> GatewayError {
    if status.is_client_error() {
        GatewayError::InvalidCredentials
    } else {
        GatewayError::Unexpected(format!("status {status}"))
    }
}

/// Status mapping for challenge dispatch/resolution calls. 404 and 410 mean
/// the challenge itself no longer exists; other client errors mean the
/// input was wrong but the challenge still stands.
fn challenge_error(status: StatusCode) -> GatewayError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => GatewayError::ChallengeGone,
        s if s.is_client_error() => GatewayError::ChallengeRejected,
        s => GatewayError::Unexpected(format!("status {s}")),
    }
}

/// Status mapping for token-protected record calls.
pub(crate) fn protected_error(status: StatusCode) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::InvalidCredentials,
        s => GatewayError::Unexpected(format!("status {s}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_mapping() {
        assert_eq!(
            credential_error(StatusCode::BAD_REQUEST),
            GatewayError::InvalidCredentials
        );
        assert_eq!(
            credential_error(StatusCode::UNAUTHORIZED),
            GatewayError::InvalidCredentials
        );
        assert!(matches!(
            credential_error(StatusCode::INTERNAL_SERVER_ERROR),
            GatewayError::Unexpected(_)
        ));
    }

    #[test]
    fn challenge_mapping_distinguishes_gone_from_rejected() {
        assert_eq!(
            challenge_error(StatusCode::NOT_FOUND),
            GatewayError::ChallengeGone
        );
        assert_eq!(challenge_error(StatusCode::GONE), GatewayError::ChallengeGone);
        assert_eq!(
            challenge_error(StatusCode::BAD_REQUEST),
            GatewayError::ChallengeRejected
        );
        assert!(challenge_error(StatusCode::BAD_REQUEST).is_retryable());
        assert!(!challenge_error(StatusCode::NOT_FOUND).is_retryable());
    }

    #[test]
    fn protected_mapping_signals_invalid_token() {
        assert_eq!(
            protected_error(StatusCode::UNAUTHORIZED),
            GatewayError::InvalidCredentials
        );
        assert!(matches!(
            protected_error(StatusCode::BAD_GATEWAY),
            GatewayError::Unexpected(_)
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let gw = Gateway::new("https://staging.chavfana.com/api/");
        assert_eq!(gw.base_url(), "https://staging.chavfana.com/api");
        assert_eq!(gw.url("/user/login/"), "https://staging.chavfana.com/api/user/login/");
    }
}
