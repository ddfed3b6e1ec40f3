//! # API crate — HTTP client for the Chavfana backend
//!
//! Every network request the app makes goes through [`Gateway`], a thin
//! stateless client over the backend's REST API. The frontends never touch
//! `reqwest` directly.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`Gateway`] — login, registration, email/phone verification, password recovery |
//! | [`records`] | Farm records (projects, planting events, animal groups) — fetch/submit only |
//! | [`types`] | Wire types for requests and responses |
//! | [`error`] | [`GatewayError`] — how HTTP outcomes map onto the app's failure vocabulary |
//!
//! The gateway holds no session state: credentials go in as arguments, the
//! token for protected record calls is passed per call. Whoever owns the
//! session decides what to do with responses.

mod client;
mod error;
pub mod records;
pub mod types;

pub use client::{Gateway, DEFAULT_API_URL};
pub use error::GatewayError;
pub use types::{
    AccountInfo, Ack, IdentifierKind, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};
