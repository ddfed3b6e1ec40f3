use dioxus::prelude::*;

use ui::components::{Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};
use ui::icons::{FaArrowLeft, FaEnvelope};
use ui::{use_carrier, Icon};

use crate::Route;

/// Informational stop on the email branch. The flow ends here in this tab;
/// the reset link in the mail carries everything the final screen needs.
#[component]
pub fn PasswordResetEmailSent() -> Element {
    let carrier = use_carrier();
    let nav = use_navigator();

    // Consume the flow for display; the link rebuilds the context.
    let destination = use_hook(move || {
        carrier
            .take_recovery()
            .map(|f| f.destination().to_string())
            .unwrap_or_default()
    });

    rsx! {
        div {
            class: "auth-page",
            Card {
                class: "auth-card",
                CardHeader {
                    div { class: "status-icon status-success",
                        Icon { icon: FaEnvelope, width: 48, height: 48 }
                    }
                    CardTitle { "Check Your Email" }
                    CardDescription {
                        if destination.is_empty() {
                            "We've sent a password reset link to your email address"
                        } else {
                            "We've sent a password reset link to {destination}"
                        }
                    }
                }
                CardContent {
                    p { class: "hint",
                        "Didn't receive the email? Check your spam folder or try again in a few minutes."
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| { nav.push(Route::Login {}); },
                        Icon { icon: FaArrowLeft, width: 14, height: 14 }
                        "Back to Login"
                    }
                }
            }
        }
    }
}
