//! Email verification. Reached two ways: from the confirmation link (the
//! opaque key rides in as a query parameter and is exchanged with the
//! gateway), or directly, in which case the screen is a resend form.

use std::time::Duration;

use dioxus::prelude::*;

use auth::{Channel, VerificationFlow};
use ui::components::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, Input,
};
use ui::icons::{FaCircleCheck, FaEnvelope};
use ui::{push_notice, use_carrier, use_gateway, use_notices, Icon};

use crate::Route;

#[component]
pub fn EmailVerification(confirmation_key: String) -> Element {
    let carrier = use_carrier();
    let gateway = use_gateway();
    let mut notices = use_notices();
    let nav = use_navigator();

    // Pick up the flow handed over by registration; a deep link (the common
    // case for email) reconstructs it.
    let mut flow = use_signal(move || {
        carrier
            .take_verification()
            .filter(|f| f.channel() == Channel::Email)
            .unwrap_or_else(|| VerificationFlow::issued(Channel::Email, ""))
    });
    let mut resend_email = use_signal(String::new);

    let has_key = !confirmation_key.is_empty();

    let handle_verify = {
        let confirmation_key = confirmation_key.clone();
        let gateway = gateway.clone();
        move |_| {
            let confirmation_key = confirmation_key.clone();
            let gateway = gateway.clone();
            spawn(async move {
                let Some(attempt) = flow.write().begin_resolve() else {
                    return;
                };
                let result = gateway.confirm_email(&confirmation_key).await.map(|_| ());
                let notice = flow.write().complete_resolve(attempt, result);
                if let Some(notice) = notice {
                    push_notice(&mut notices, notice);
                }
                if flow.peek().is_verified() {
                    // Let the success card sit for a moment before login.
                    ui::sleep(Duration::from_secs(2)).await;
                    nav.push(Route::Login {});
                }
            });
        }
    };

    let handle_resend = {
        let gateway = gateway.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let gateway = gateway.clone();
            spawn(async move {
                let email = resend_email().trim().to_string();
                if email.is_empty() {
                    return;
                }
                flow.write().set_destination(email.clone());
                let Some(attempt) = flow.write().begin_resend() else {
                    return;
                };
                let result = gateway.resend_email(&email).await.map(|_| ());
                let notice = flow.write().complete_resend(attempt, result);
                if let Some(notice) = notice {
                    push_notice(&mut notices, notice);
                }
            });
        }
    };

    if flow.read().is_verified() {
        return rsx! {
            div {
                class: "auth-page",
                Card {
                    class: "auth-card",
                    CardHeader {
                        div { class: "status-icon status-success",
                            Icon { icon: FaCircleCheck, width: 48, height: 48 }
                        }
                        CardTitle { "Email Verified!" }
                        CardDescription {
                            "Your email has been successfully verified. Redirecting to login..."
                        }
                    }
                }
            }
        };
    }

    rsx! {
        div {
            class: "auth-page",
            Card {
                class: "auth-card",
                CardHeader {
                    div { class: "status-icon",
                        Icon { icon: FaEnvelope, width: 48, height: 48 }
                    }
                    CardTitle { "Email Verification" }
                    CardDescription { "Verify your email address to continue" }
                }
                CardContent {
                    // Once the gateway says the key is dead, only resending helps.
                    if has_key && !flow.read().resend_only() {
                        div { class: "auth-form",
                            p { class: "hint",
                                "Click the button below to verify your email address."
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                disabled: flow.read().is_pending(),
                                onclick: handle_verify,
                                if flow.read().is_pending() { "Verifying..." } else { "Verify Email" }
                            }
                        }
                    } else {
                        form {
                            onsubmit: handle_resend,
                            class: "auth-form",
                            Input {
                                r#type: "email",
                                placeholder: "Enter your email address",
                                value: resend_email(),
                                oninput: move |evt: FormEvent| resend_email.set(evt.value()),
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                r#type: "submit",
                                disabled: flow.read().is_pending(),
                                "Resend Verification Email"
                            }
                        }
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
}
