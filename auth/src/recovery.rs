//! # Password recovery flow
//!
//! One state machine, two branches. The phone branch goes through an
//! explicit code-verification step and re-submits the verified code together
//! with the new password. The email branch never sees its token until the
//! user lands on the reset screen through the emailed link, at which point
//! the uid/token pair from the URL is merged in and the password can be
//! submitted directly.
//!
//! ```text
//!                 MethodSelect
//!                      | dispatch ok
//!                      v
//!               ChallengeDispatched ----email: link adopted----+
//!            phone: | verify code ok                           |
//!                      v                                       |
//!                 CodeVerified                                 |
//!                      | submit password                       |
//!                      +----------> PasswordSubmitted <--------+
//!                                        | ok
//!                                        v
//!                                       Done
//! ```
//!
//! The recovery context (destination, verified code, uid/token) lives only
//! inside this value. It is scrubbed when the flow reaches `Done` and simply
//! dropped on abandonment; it is never serialized and its `Debug` output
//! hides the secrets.

use api::GatewayError;

use crate::flow::{Attempt, Channel, Notice};
use crate::validate::{validate_new_password, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryState {
    /// Choosing email or phone.
    MethodSelect,
    /// The reset email or SMS is out.
    ChallengeDispatched,
    /// Phone only: the code was accepted, a new password may be chosen.
    CodeVerified,
    /// The new password is on its way to the gateway.
    PasswordSubmitted,
    /// Terminal: the password was reset, the context is gone.
    Done,
}

/// What the final confirmation call needs, per branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResetSubmission {
    Phone { phone: String, code: String },
    Email { uid: String, token: String },
}

#[derive(Clone)]
enum RecoveryContext {
    Phone {
        phone: String,
        verified_code: Option<String>,
    },
    Email {
        email: String,
        uid: Option<String>,
        token: Option<String>,
    },
}

/// The active password-recovery attempt.
#[derive(Clone)]
pub struct RecoveryFlow {
    context: RecoveryContext,
    state: RecoveryState,
    epoch: u64,
    pending: bool,
}

// Recovery secrets stay out of logs.
impl std::fmt::Debug for RecoveryFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryFlow")
            .field("channel", &self.channel().as_str())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl RecoveryFlow {
    pub fn new_phone(phone: impl Into<String>) -> Self {
        Self {
            context: RecoveryContext::Phone {
                phone: phone.into(),
                verified_code: None,
            },
            state: RecoveryState::MethodSelect,
            epoch: 0,
            pending: false,
        }
    }

    pub fn new_email(email: impl Into<String>) -> Self {
        Self {
            context: RecoveryContext::Email {
                email: email.into(),
                uid: None,
                token: None,
            },
            state: RecoveryState::MethodSelect,
            epoch: 0,
            pending: false,
        }
    }

    /// Reconstruct the email branch from a reset link. The user may arrive
    /// here in a fresh browser with no prior flow in memory.
    pub fn from_link(uid: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            context: RecoveryContext::Email {
                email: String::new(),
                uid: Some(uid.into()),
                token: Some(token.into()),
            },
            state: RecoveryState::ChallengeDispatched,
            epoch: 0,
            pending: false,
        }
    }

    /// Merge uid/token read from the URL into an email flow that was started
    /// in this app instance.
    pub fn adopt_link(&mut self, uid: impl Into<String>, token: impl Into<String>) {
        match &mut self.context {
            RecoveryContext::Email {
                uid: slot_uid,
                token: slot_token,
                ..
            } if self.state != RecoveryState::Done => {
                *slot_uid = Some(uid.into());
                *slot_token = Some(token.into());
            }
            _ => tracing::warn!("reset link ignored: no email recovery in progress"),
        }
    }

    pub fn channel(&self) -> Channel {
        match self.context {
            RecoveryContext::Phone { .. } => Channel::Phone,
            RecoveryContext::Email { .. } => Channel::Email,
        }
    }

    /// Where the challenge went, for display ("We sent a code to ...").
    pub fn destination(&self) -> &str {
        match &self.context {
            RecoveryContext::Phone { phone, .. } => phone,
            RecoveryContext::Email { email, .. } => email,
        }
    }

    pub fn state(&self) -> RecoveryState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_done(&self) -> bool {
        self.state == RecoveryState::Done
    }

    fn accept(&mut self) -> Attempt {
        self.pending = true;
        Attempt { epoch: self.epoch }
    }

    fn settle(&mut self, attempt: Attempt) -> bool {
        if !self.pending || attempt.epoch != self.epoch {
            tracing::debug!("stale recovery response dropped");
            return false;
        }
        self.pending = false;
        self.epoch += 1;
        true
    }

    // --- Dispatch & resend ------------------------------------------------

    /// Ask to send the reset email/SMS from the method-selection step.
    pub fn begin_dispatch(&mut self) -> Option<Attempt> {
        if self.pending || self.state != RecoveryState::MethodSelect {
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
                self.state = RecoveryState::ChallengeDispatched;
                self.dispatched_notice()
            }
            Err(err) => failure_notice(
                "Failed to send reset request",
                "Please check your details and try again.",
                &err,
            ),
        })
    }

    /// Re-send the challenge while it is out.
    pub fn begin_resend(&mut self) -> Option<Attempt> {
        if self.pending || self.state != RecoveryState::ChallengeDispatched {
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
            Ok(()) => self.dispatched_notice(),
            Err(err) => failure_notice("Failed to send code", "Please try again later.", &err),
        })
    }

    // --- Phone branch: code verification ----------------------------------

    pub fn begin_verify_code(&mut self) -> Option<Attempt> {
        let phone = matches!(self.context, RecoveryContext::Phone { .. });
        if self.pending || !phone || self.state != RecoveryState::ChallengeDispatched {
            return None;
        }
        Some(self.accept())
    }

    /// Feed back the gateway's verdict on the code the user typed. On
    /// acceptance the code is kept: the final confirmation re-submits it
    /// alongside the new password.
    pub fn complete_verify_code(
        &mut self,
        attempt: Attempt,
        code: &str,
        result: Result<(), GatewayError>,
    ) -> Option<Notice> {
        if !self.settle(attempt) {
            return None;
        }
        Some(match result {
            Ok(()) => {
                if let RecoveryContext::Phone { verified_code, .. } = &mut self.context {
                    *verified_code = Some(code.to_string());
                }
                self.state = RecoveryState::CodeVerified;
                Notice::success(
                    "Code verified successfully!",
                    "You can now set a new password.",
                )
            }
            Err(err) => failure_notice(
                "Verification failed",
                "Please check your code and try again.",
                &err,
            ),
        })
    }

    // --- Final password submission ----------------------------------------

    /// Validate locally and, if the flow is in a submittable position, hand
    /// out the attempt for the confirmation call. Validation failures never
    /// reach the gateway.
    pub fn submit_password(
        &mut self,
        password: &str,
        confirmation: &str,
    ) -> Result<Attempt, ValidationError> {
        if self.pending {
            return Err(ValidationError::NotReadyForPassword);
        }
        match &self.context {
            RecoveryContext::Phone { .. } => {
                if self.state != RecoveryState::CodeVerified {
                    return Err(ValidationError::NotReadyForPassword);
                }
            }
            RecoveryContext::Email { uid, token, .. } => {
                if self.state != RecoveryState::ChallengeDispatched {
                    return Err(ValidationError::NotReadyForPassword);
                }
                if uid.is_none() || token.is_none() {
                    return Err(ValidationError::MissingResetToken);
                }
            }
        }
        validate_new_password(password, confirmation)?;
        self.state = RecoveryState::PasswordSubmitted;
        Ok(self.accept())
    }

    /// The proof the confirmation call must carry, per branch. `None` once
    /// the context was consumed or before the branch earned it.
    pub fn submission(&self) -> Option<ResetSubmission> {
        match &self.context {
            RecoveryContext::Phone {
                phone,
                verified_code: Some(code),
            } => Some(ResetSubmission::Phone {
                phone: phone.clone(),
                code: code.clone(),
            }),
            RecoveryContext::Email {
                uid: Some(uid),
                token: Some(token),
                ..
            } => Some(ResetSubmission::Email {
                uid: uid.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }

    pub fn complete_submit(
        &mut self,
        attempt: Attempt,
        result: Result<(), GatewayError>,
    ) -> Option<Notice> {
        if !self.settle(attempt) {
            return None;
        }
        Some(match result {
            Ok(()) => {
                self.state = RecoveryState::Done;
                self.scrub();
                Notice::success(
                    "Password reset successful!",
                    "You can now log in with your new password.",
                )
            }
            Err(err) => {
                // Back to where the password step was entered from.
                self.state = match self.context {
                    RecoveryContext::Phone { .. } => RecoveryState::CodeVerified,
                    RecoveryContext::Email { .. } => RecoveryState::ChallengeDispatched,
                };
                failure_notice(
                    "Password reset failed",
                    "Please try again or request a new reset link.",
                    &err,
                )
            }
        })
    }

    /// The context is consumed at final submission; nothing sensitive
    /// outlives the flow.
    fn scrub(&mut self) {
        match &mut self.context {
            RecoveryContext::Phone { verified_code, .. } => *verified_code = None,
            RecoveryContext::Email { uid, token, .. } => {
                *uid = None;
                *token = None;
            }
        }
    }

    fn dispatched_notice(&self) -> Notice {
        match self.channel() {
            Channel::Email => Notice::info(
                "Password reset email sent",
                "Please check your email for the reset link.",
            ),
            Channel::Phone => Notice::info(
                "Verification code sent",
                "Please check your phone for the verification code.",
            ),
        }
    }
}

fn failure_notice(title: &str, semantic_body: &str, err: &GatewayError) -> Notice {
    let body = match err {
        GatewayError::Network(_) => "Network problem. Check your connection and try again.",
        GatewayError::ChallengeGone => "This code or link is no longer valid. Request a new one.",
        _ => semantic_body,
    };
    Notice::error(title, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoticeLevel;

    /// Drive a phone flow to `ChallengeDispatched`.
    fn dispatched_phone() -> RecoveryFlow {
        let mut flow = RecoveryFlow::new_phone("+15551234567");
        let att = flow.begin_dispatch().unwrap();
        flow.complete_dispatch(att, Ok(())).unwrap();
        flow
    }

    /// Drive a phone flow to `CodeVerified` with the given code accepted.
    fn verified_phone(code: &str) -> RecoveryFlow {
        let mut flow = dispatched_phone();
        let att = flow.begin_verify_code().unwrap();
        flow.complete_verify_code(att, code, Ok(())).unwrap();
        flow
    }

    #[test]
    fn phone_branch_happy_path() {
        let mut flow = RecoveryFlow::new_phone("+15551234567");
        assert_eq!(flow.state(), RecoveryState::MethodSelect);

        let att = flow.begin_dispatch().unwrap();
        flow.complete_dispatch(att, Ok(())).unwrap();
        assert_eq!(flow.state(), RecoveryState::ChallengeDispatched);

        // Wrong code keeps the state.
        let att = flow.begin_verify_code().unwrap();
        let notice = flow
            .complete_verify_code(att, "000000", Err(GatewayError::ChallengeRejected))
            .unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(flow.state(), RecoveryState::ChallengeDispatched);

        // Correct code advances and is retained for the final submission.
        let att = flow.begin_verify_code().unwrap();
        flow.complete_verify_code(att, "123456", Ok(())).unwrap();
        assert_eq!(flow.state(), RecoveryState::CodeVerified);

        let att = flow.submit_password("Abcd1234", "Abcd1234").unwrap();
        assert_eq!(flow.state(), RecoveryState::PasswordSubmitted);
        assert_eq!(
            flow.submission(),
            Some(ResetSubmission::Phone {
                phone: "+15551234567".into(),
                code: "123456".into(),
            })
        );

        flow.complete_submit(att, Ok(())).unwrap();
        assert!(flow.is_done());
        // The context was consumed with the submission.
        assert_eq!(flow.submission(), None);
    }

    #[test]
    fn email_link_bypasses_the_code_step() {
        let mut flow = RecoveryFlow::from_link("dXNlcjQy", "tok-abc123");
        assert_eq!(flow.state(), RecoveryState::ChallengeDispatched);

        let att = flow.submit_password("Abcd1234", "Abcd1234").unwrap();
        assert_eq!(
            flow.submission(),
            Some(ResetSubmission::Email {
                uid: "dXNlcjQy".into(),
                token: "tok-abc123".into(),
            })
        );
        flow.complete_submit(att, Ok(())).unwrap();
        assert!(flow.is_done());
    }

    #[test]
    fn email_without_link_params_cannot_submit() {
        let mut flow = RecoveryFlow::new_email("farmer@example.com");
        let att = flow.begin_dispatch().unwrap();
        flow.complete_dispatch(att, Ok(())).unwrap();

        assert_eq!(
            flow.submit_password("Abcd1234", "Abcd1234").unwrap_err(),
            ValidationError::MissingResetToken
        );

        // The link arrives later; merging it unlocks submission.
        flow.adopt_link("uid", "token");
        assert!(flow.submit_password("Abcd1234", "Abcd1234").is_ok());
    }

    #[test]
    fn short_password_is_rejected_locally() {
        let mut flow = verified_phone("123456");
        assert_eq!(
            flow.submit_password("short1", "short1").unwrap_err(),
            ValidationError::PasswordTooShort
        );
        // No attempt was issued, no state moved.
        assert_eq!(flow.state(), RecoveryState::CodeVerified);
        assert!(!flow.is_pending());
    }

    #[test]
    fn mismatched_password_is_rejected_locally() {
        let mut flow = verified_phone("123456");
        assert_eq!(
            flow.submit_password("Abcd1234", "Abcd9999").unwrap_err(),
            ValidationError::PasswordMismatch
        );
        assert_eq!(flow.state(), RecoveryState::CodeVerified);
    }

    #[test]
    fn failed_submission_returns_to_the_eligible_state() {
        let mut flow = verified_phone("123456");
        let att = flow.submit_password("Abcd1234", "Abcd1234").unwrap();
        let notice = flow
            .complete_submit(att, Err(GatewayError::ChallengeRejected))
            .unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(flow.state(), RecoveryState::CodeVerified);

        // A stale replay of the failed attempt cannot finish the flow.
        assert!(flow.complete_submit(att, Ok(())).is_none());
        assert_eq!(flow.state(), RecoveryState::CodeVerified);

        // The retry can.
        let att = flow.submit_password("Abcd1234", "Abcd1234").unwrap();
        flow.complete_submit(att, Ok(())).unwrap();
        assert!(flow.is_done());
    }

    #[test]
    fn resend_keeps_state_and_reports() {
        let mut flow = dispatched_phone();
        let att = flow.begin_resend().unwrap();
        let notice = flow.complete_resend(att, Ok(())).unwrap();
        assert_eq!(notice.title, "Verification code sent");
        assert_eq!(flow.state(), RecoveryState::ChallengeDispatched);
    }

    #[test]
    fn verify_code_is_debounced_while_pending() {
        let mut flow = dispatched_phone();
        let _att = flow.begin_verify_code().unwrap();
        assert!(flow.begin_verify_code().is_none());
        assert!(flow.begin_resend().is_none());
    }

    #[test]
    fn phone_flow_never_offers_the_email_link_merge() {
        let mut flow = dispatched_phone();
        flow.adopt_link("uid", "token");
        // Still requires the code step.
        assert_eq!(
            flow.submit_password("Abcd1234", "Abcd1234").unwrap_err(),
            ValidationError::NotReadyForPassword
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let flow = verified_phone("123456");
        let rendered = format!("{flow:?}");
        assert!(!rendered.contains("123456"));
    }
}
