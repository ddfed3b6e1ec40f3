//! Authentication context for the UI.
//!
//! [`AuthProvider`] owns the process-wide [`SessionStore`], hydrates it from
//! durable storage on startup, and mirrors every change into a signal the
//! rest of the tree reads through [`use_auth`]. It also provides the gateway
//! client and the flow carrier, so screens get everything identity-related
//! from one place.

use api::Gateway;
use auth::{FlowCarrier, SessionStore};
use dioxus::prelude::*;
use store::Session;

/// The storage backend sessions persist to on this platform.
#[cfg(target_arch = "wasm32")]
pub type ClientBackend = store::LocalStorageBackend;
#[cfg(not(target_arch = "wasm32"))]
pub type ClientBackend = store::FileBackend;

fn default_backend() -> ClientBackend {
    #[cfg(target_arch = "wasm32")]
    {
        store::LocalStorageBackend::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("chavfana");
        store::FileBackend::new(base)
    }
}

/// The current session. `None` means anonymous. Updates whenever the user
/// logs in or out, including token invalidation.
pub fn use_auth() -> Signal<Option<Session>> {
    use_context::<Signal<Option<Session>>>()
}

pub fn use_session_store() -> SessionStore<ClientBackend> {
    use_context::<SessionStore<ClientBackend>>()
}

pub fn use_gateway() -> Gateway {
    use_context::<Gateway>()
}

pub fn use_carrier() -> FlowCarrier {
    use_context::<FlowCarrier>()
}

/// Provider component that manages authentication state.
/// Wrap the app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    // Hydrate before anyone subscribes, so startup does not broadcast
    // mid-render; the signal seeds from the hydrated value instead.
    let store = use_hook(|| {
        let store = SessionStore::new(default_backend());
        store.hydrate();
        store
    });

    let session_signal = use_signal({
        let store = store.clone();
        move || store.current()
    });

    use_hook({
        let store = store.clone();
        move || {
            store.subscribe(move |session| {
                let mut signal = session_signal;
                signal.set(session.cloned());
            });
        }
    });

    use_context_provider(|| store.clone());
    use_context_provider(move || session_signal);
    use_context_provider(Gateway::from_env);
    use_context_provider(FlowCarrier::new);

    rsx! {
        {children}
    }
}

/// Button to log out the current user. Clearing is local and immediate; the
/// route guard notices the broadcast and sends the user back to login.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let store = use_session_store();

    let onclick = move |_| {
        store.logout();
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/");
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
