use dioxus::prelude::*;

use ui::components::{Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};
use ui::icons::{FaArrowRight, FaCircleCheck};
use ui::Icon;

use crate::Route;

/// Terminal screen after registering: the account exists, the verification
/// challenge is on its way over the chosen channel.
#[component]
pub fn RegistrationSuccess() -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            class: "auth-page",
            Card {
                class: "auth-card",
                CardHeader {
                    div { class: "status-icon status-success",
                        Icon { icon: FaCircleCheck, width: 48, height: 48 }
                    }
                    CardTitle { "Registration Successful!" }
                    CardDescription {
                        "Your farm has been successfully registered. Verify your contact details, then log in to access your farm management dashboard."
                    }
                }
                CardContent {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| { nav.push(Route::Login {}); },
                        "Continue to Login"
                        Icon { icon: FaArrowRight, width: 14, height: 14 }
                    }
                }
            }
        }
    }
}
