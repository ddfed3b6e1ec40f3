//! # Auth crate — session and identity-flow orchestration
//!
//! Everything stateful about identity lives here, consolidated out of the
//! individual screens. The screens call the gateway, but every decision
//! about what a response *means* — whether a session exists, whether a
//! verification can be retried, what the user should be told — is made by
//! the types in this crate, which are plain Rust and fully testable without
//! a UI or a network.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | [`SessionStore`] — owns the one authenticated session, persists it, broadcasts changes |
//! | [`verification`] | [`VerificationFlow`] — post-registration email/phone challenge state machine |
//! | [`recovery`] | [`RecoveryFlow`] — password-recovery state machine for both channels |
//! | [`carrier`] | [`FlowCarrier`] — in-memory handoff of an active flow between screens |
//! | [`flow`] | Shared vocabulary: [`Channel`], [`Attempt`] tokens, user-facing [`Notice`]s |
//! | [`validate`] | Client-side password preconditions ([`ValidationError`]) |
//!
//! ## Concurrency contract
//!
//! Gateway calls are async; the state machines are not. A screen asks a flow
//! for an [`Attempt`] token (refused while a call is pending — that is the
//! debounce), performs the call, and feeds the result back together with the
//! token. A token from a superseded attempt is ignored, so a response that
//! arrives after the user moved on cannot mutate anything.

pub mod carrier;
pub mod flow;
pub mod recovery;
pub mod session;
pub mod validate;
pub mod verification;

pub use carrier::{FlowCarrier, FlowContext};
pub use flow::{Attempt, Channel, Notice, NoticeLevel};
pub use recovery::{RecoveryFlow, RecoveryState, ResetSubmission};
pub use session::{session_from_registration, SessionStore};
pub use validate::{validate_new_password, ValidationError, MIN_PASSWORD_LEN};
pub use verification::{VerificationFlow, VerificationState};
