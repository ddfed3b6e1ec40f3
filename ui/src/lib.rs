//! Shared UI for the Chavfana dashboard: the auth provider, the route
//! guard, the notice surface, and the small form components every screen
//! uses.

use std::time::Duration;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod provider;
pub use provider::{
    use_auth, use_carrier, use_gateway, use_session_store, AuthProvider, ClientBackend,
    LogoutButton,
};

mod guard;
pub use guard::Protected;

mod notice;
pub use notice::{push_notice, use_notices, ActiveNotice, NoticeProvider};

mod farm_header;
pub use farm_header::FarmHeader;

/// Platform-appropriate async sleep (the UX redirect delays and notice
/// auto-dismiss use this).
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
