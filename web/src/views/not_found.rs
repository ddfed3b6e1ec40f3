use dioxus::prelude::*;

use ui::components::{Button, ButtonVariant, Card, CardDescription, CardHeader, CardTitle};

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    let path = segments.join("/");

    rsx! {
        div {
            class: "auth-page",
            Card {
                class: "auth-card",
                CardHeader {
                    CardTitle { "Page not found" }
                    CardDescription { "There is nothing at /{path}" }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| { nav.push(Route::Login {}); },
                    "Back to Login"
                }
            }
        }
    }
}
