use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaSeedling;
use dioxus_free_icons::Icon;

use crate::{use_auth, LogoutButton};

/// Top bar of the protected area: farm identity on the left, the signed-in
/// contact and logout on the right.
#[component]
pub fn FarmHeader() -> Element {
    let auth = use_auth();
    let session = auth();

    let farm_name = session
        .as_ref()
        .map(|s| s.farm_name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Your Farm".to_string());
    let contact = session
        .as_ref()
        .and_then(|s| s.contact().map(str::to_string));

    rsx! {
        header {
            class: "farm-header",
            div {
                class: "farm-header-identity",
                Icon { icon: FaSeedling, width: 24, height: 24 }
                span { class: "farm-header-name", "{farm_name}" }
            }
            div {
                class: "farm-header-actions",
                if let Some(contact) = contact {
                    span { class: "farm-header-contact", "{contact}" }
                }
                LogoutButton { class: "btn btn-ghost" }
            }
        }
    }
}
