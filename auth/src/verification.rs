//! # Post-registration verification flow
//!
//! One state machine for both channels. The email challenge resolves with an
//! opaque key carried by the confirmation link; the phone challenge resolves
//! with a numeric code the user types. The machine only decides state and
//! wording — the screen owns the async gateway call and feeds the outcome
//! back with the [`Attempt`] token it was given.
//!
//! ```text
//! Unverified --dispatch ok--> ChallengeIssued --resolve ok--> Verified
//!                                   |  ^
//!                     resolve gone  |  | resend ok
//!                                   v  |
//!                                  Failed
//! ```
//!
//! Rejected input and network failures keep the machine in
//! `ChallengeIssued`: both are retryable, they just read differently in the
//! notice.

use api::GatewayError;

use crate::flow::{Attempt, Channel, Notice};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationState {
    /// Registered, no challenge dispatched yet.
    Unverified,
    /// A challenge is out; waiting for the key or code.
    ChallengeIssued,
    /// Terminal success.
    Verified,
    /// The challenge is gone; only a resend helps.
    Failed,
}

/// The challenge currently being driven. Reconstructed per attempt, never
/// persisted.
#[derive(Clone, Debug)]
pub struct VerificationFlow {
    channel: Channel,
    destination: String,
    state: VerificationState,
    epoch: u64,
    pending: bool,
}

impl VerificationFlow {
    /// A flow for a challenge that still has to be dispatched (phone: the
    /// SMS is requested explicitly after registration).
    pub fn new(channel: Channel, destination: impl Into<String>) -> Self {
        Self {
            channel,
            destination: destination.into(),
            state: VerificationState::Unverified,
            epoch: 0,
            pending: false,
        }
    }

    /// A flow whose challenge was already dispatched out-of-band (email:
    /// the backend mails the link as part of registration).
    pub fn issued(channel: Channel, destination: impl Into<String>) -> Self {
        Self {
            state: VerificationState::ChallengeIssued,
            ..Self::new(channel, destination)
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The resend form captures a destination when the flow was entered
    /// without one (deep link into the verification screen).
    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = destination.into();
    }

    pub fn state(&self) -> VerificationState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_verified(&self) -> bool {
        self.state == VerificationState::Verified
    }

    /// Only a resend is useful once the challenge is gone.
    pub fn resend_only(&self) -> bool {
        self.state == VerificationState::Failed
    }

    fn accept(&mut self) -> Attempt {
        self.pending = true;
        Attempt { epoch: self.epoch }
    }

    /// A completion is current iff it carries the token of the outstanding
    /// attempt; everything else is a stale response and a no-op.
    fn settle(&mut self, attempt: Attempt) -> bool {
        if !self.pending || attempt.epoch != self.epoch {
            tracing::debug!(channel = self.channel.as_str(), "stale verification response dropped");
            return false;
        }
        self.pending = false;
        self.epoch += 1;
        true
    }

    // --- Dispatch ---------------------------------------------------------

    /// Ask to dispatch the initial challenge. `None` while a call is
    /// pending or when the challenge is already out.
    pub fn begin_dispatch(&mut self) -> Option<Attempt> {
        if self.pending || self.state != VerificationState::Unverified {
            return None;
        }
        Some(self.accept())
    }

    pub fn complete_dispatch(
        &mut self,
        attempt: Attempt,
        result: Result<(), GatewayError>,
    ) -> Option<Notice> {
        if !self.settle(attempt) {
            return None;
        }
        Some(match result {
            Ok(()) => {
                self.state = VerificationState::ChallengeIssued;
                self.sent_notice()
            }
            Err(err) => self.failure_notice("Failed to send code", &err),
        })
    }

    // --- Resolve ----------------------------------------------------------

    /// Ask to resolve the challenge (submit the code, or exchange the link
    /// key). `None` while pending or outside `ChallengeIssued` — a second
    /// correct submission after `Verified` never starts.
    pub fn begin_resolve(&mut self) -> Option<Attempt> {
        if self.pending || self.state != VerificationState::ChallengeIssued {
            return None;
        }
        Some(self.accept())
    }

    pub fn complete_resolve(
        &mut self,
        attempt: Attempt,
        result: Result<(), GatewayError>,
    ) -> Option<Notice> {
        if !self.settle(attempt) {
            return None;
        }
        Some(match result {
            Ok(()) => {
                self.state = VerificationState::Verified;
                match self.channel {
                    Channel::Email => Notice::success(
                        "Email verified successfully!",
                        "You can now log in to your account.",
                    ),
                    Channel::Phone => Notice::success(
                        "Phone verified successfully!",
                        "You can now log in to your account.",
                    ),
                }
            }
            Err(GatewayError::ChallengeGone) => {
                self.state = VerificationState::Failed;
                Notice::error(
                    "Verification expired",
                    "This code or link is no longer valid. Request a new one below.",
                )
            }
            Err(err) => self.failure_notice("Verification failed", &err),
        })
    }

    // --- Resend -----------------------------------------------------------

    /// Ask to re-dispatch. Allowed while the challenge is out (lost email,
    /// missed SMS) and after the challenge is gone.
    pub fn begin_resend(&mut self) -> Option<Attempt> {
        let allowed = matches!(
            self.state,
            VerificationState::ChallengeIssued | VerificationState::Failed
        );
        if self.pending || !allowed {
            return None;
        }
        Some(self.accept())
    }

    pub fn complete_resend(
        &mut self,
        attempt: Attempt,
        result: Result<(), GatewayError>,
    ) -> Option<Notice> {
        if !self.settle(attempt) {
            return None;
        }
        Some(match result {
            Ok(()) => {
                // A fresh challenge replaces a dead one.
                self.state = VerificationState::ChallengeIssued;
                self.sent_notice()
            }
            Err(err) => self.failure_notice("Failed to resend", &err),
        })
    }

    fn sent_notice(&self) -> Notice {
        match self.channel {
            Channel::Email => Notice::info(
                "Verification email sent",
                "Please check your email for the verification link.",
            ),
            Channel::Phone => Notice::info(
                "Verification code sent",
                "Please check your phone for the verification code.",
            ),
        }
    }

    /// Network problems and semantic rejections stay retryable but read
    /// differently.
    fn failure_notice(&self, title: &str, err: &GatewayError) -> Notice {
        let body = match (err, self.channel) {
            (GatewayError::Network(_), _) => {
                "Network problem. Check your connection and try again.".to_string()
            }
            (_, Channel::Phone) => "Please check your code and try again.".to_string(),
            (_, Channel::Email) => {
                "Please try again or request a new verification email.".to_string()
            }
        };
        Notice::error(title, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued_phone() -> VerificationFlow {
        VerificationFlow::issued(Channel::Phone, "+15551234567")
    }

    #[test]
    fn dispatch_moves_unverified_to_challenge_issued() {
        let mut flow = VerificationFlow::new(Channel::Phone, "+15551234567");
        assert_eq!(flow.state(), VerificationState::Unverified);

        let att = flow.begin_dispatch().unwrap();
        assert!(flow.is_pending());
        // Debounce: nothing else starts while the call is out.
        assert!(flow.begin_dispatch().is_none());
        assert!(flow.begin_resolve().is_none());

        let notice = flow.complete_dispatch(att, Ok(())).unwrap();
        assert_eq!(notice.level, crate::NoticeLevel::Info);
        assert_eq!(flow.state(), VerificationState::ChallengeIssued);
    }

    #[test]
    fn failed_dispatch_stays_unverified_and_is_retryable() {
        let mut flow = VerificationFlow::new(Channel::Phone, "+15551234567");
        let att = flow.begin_dispatch().unwrap();
        let notice = flow
            .complete_dispatch(att, Err(GatewayError::Network("timeout".into())))
            .unwrap();
        assert_eq!(notice.level, crate::NoticeLevel::Error);
        assert_eq!(flow.state(), VerificationState::Unverified);
        assert!(flow.begin_dispatch().is_some());
    }

    #[test]
    fn wrong_code_keeps_challenge_issued() {
        let mut flow = issued_phone();
        let att = flow.begin_resolve().unwrap();
        let notice = flow
            .complete_resolve(att, Err(GatewayError::ChallengeRejected))
            .unwrap();
        assert_eq!(notice.level, crate::NoticeLevel::Error);
        assert_eq!(flow.state(), VerificationState::ChallengeIssued);
        // Retry is available immediately.
        assert!(flow.begin_resolve().is_some());
    }

    #[test]
    fn correct_code_verifies_exactly_once() {
        let mut flow = issued_phone();
        let att = flow.begin_resolve().unwrap();
        assert!(flow.complete_resolve(att, Ok(())).is_some());
        assert!(flow.is_verified());

        // A second submission after success never starts.
        assert!(flow.begin_resolve().is_none());
        // And replaying the settled attempt is a no-op, not a second success.
        assert!(flow.complete_resolve(att, Ok(())).is_none());
        assert!(flow.is_verified());
    }

    #[test]
    fn challenge_gone_fails_and_only_resend_recovers() {
        let mut flow = issued_phone();
        let att = flow.begin_resolve().unwrap();
        flow.complete_resolve(att, Err(GatewayError::ChallengeGone))
            .unwrap();
        assert_eq!(flow.state(), VerificationState::Failed);
        assert!(flow.resend_only());
        assert!(flow.begin_resolve().is_none());

        let att = flow.begin_resend().unwrap();
        flow.complete_resend(att, Ok(())).unwrap();
        assert_eq!(flow.state(), VerificationState::ChallengeIssued);
    }

    #[test]
    fn resend_does_not_change_state_while_challenge_is_out() {
        let mut flow = VerificationFlow::issued(Channel::Email, "farmer@example.com");
        let att = flow.begin_resend().unwrap();
        let notice = flow.complete_resend(att, Ok(())).unwrap();
        assert_eq!(notice.title, "Verification email sent");
        assert_eq!(flow.state(), VerificationState::ChallengeIssued);
    }

    #[test]
    fn stale_response_does_not_mutate_state() {
        let mut flow = issued_phone();
        let stale = flow.begin_resolve().unwrap();
        // The user retried; the first response comes back after the second
        // attempt settled.
        flow.complete_resolve(stale, Err(GatewayError::Network("t".into())))
            .unwrap();
        let fresh = flow.begin_resolve().unwrap();
        assert!(flow.complete_resolve(stale, Ok(())).is_none());
        assert_eq!(flow.state(), VerificationState::ChallengeIssued);

        flow.complete_resolve(fresh, Ok(())).unwrap();
        assert!(flow.is_verified());
    }

    #[test]
    fn network_and_rejection_read_differently() {
        let mut flow = issued_phone();
        let att = flow.begin_resolve().unwrap();
        let net = flow
            .complete_resolve(att, Err(GatewayError::Network("down".into())))
            .unwrap();
        let att = flow.begin_resolve().unwrap();
        let rej = flow
            .complete_resolve(att, Err(GatewayError::ChallengeRejected))
            .unwrap();
        assert_ne!(net.body, rej.body);
    }
}
