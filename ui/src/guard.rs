//! Route guard for the protected area.

use dioxus::prelude::*;

use crate::use_auth;

/// Wrap protected views: renders children only while a session exists and
/// replaces the navigation with the login entry point otherwise. The check
/// re-runs on every session broadcast, so a logout anywhere kicks the user
/// out immediately — there is no cached admission. The denied path is not
/// recorded anywhere.
#[component]
pub fn Protected(children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if auth().is_none() {
            tracing::debug!("unauthenticated navigation, redirecting to login");
            nav.replace("/");
        }
    });

    if auth().is_none() {
        // Nothing protected is mounted while the redirect happens.
        return rsx! {};
    }

    rsx! {
        {children}
    }
}
