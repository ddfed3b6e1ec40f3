//! Failure vocabulary for gateway calls.

use thiserror::Error;

/// Everything a gateway call can fail with, from the app's point of view.
///
/// Controllers branch on the variant, never on HTTP status codes; the
/// mapping from status to variant happens once, in the client.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Wrong identifier/password, or a login-shaped response missing its
    /// required fields. Never stored as a session.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The challenge exists but the submitted input was wrong (bad code,
    /// expired link content). Retry with corrected input is allowed.
    #[error("the code or link was not accepted")]
    ChallengeRejected,

    /// The challenge itself is gone; only a resend can recover.
    #[error("this code or link is no longer valid, request a new one")]
    ChallengeGone,

    /// Transport-level failure: DNS, connection, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// A response we have no mapping for.
    #[error("unexpected response: {0}")]
    Unexpected(String),
}

impl GatewayError {
    /// True when retrying the same action may succeed without a resend.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GatewayError::ChallengeGone)
    }
}
