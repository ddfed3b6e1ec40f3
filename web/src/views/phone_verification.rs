//! Phone verification: the user types the SMS code; the destination rides
//! in with the flow handed over by registration.

use std::time::Duration;

use dioxus::prelude::*;

use auth::{Channel, VerificationFlow};
use ui::components::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, Input,
};
use ui::icons::{FaCircleCheck, FaPhone};
use ui::{push_notice, use_carrier, use_gateway, use_notices, Icon};

use crate::Route;

#[component]
pub fn PhoneVerification() -> Element {
    let carrier = use_carrier();
    let gateway = use_gateway();
    let mut notices = use_notices();
    let nav = use_navigator();

    let mut flow = use_signal(move || {
        carrier
            .take_verification()
            .filter(|f| f.channel() == Channel::Phone)
            .unwrap_or_else(|| VerificationFlow::issued(Channel::Phone, ""))
    });
    let mut code = use_signal(String::new);

    let phone = flow.read().destination().to_string();

    let handle_verify = {
        let gateway = gateway.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let gateway = gateway.clone();
            spawn(async move {
                let phone = flow.peek().destination().to_string();
                let entered = code().trim().to_string();
                if entered.is_empty() || phone.is_empty() {
                    return;
                }
                let Some(attempt) = flow.write().begin_resolve() else {
                    return;
                };
                let result = gateway.confirm_phone(&phone, &entered).await.map(|_| ());
                let notice = flow.write().complete_resolve(attempt, result);
                if let Some(notice) = notice {
                    push_notice(&mut notices, notice);
                }
                if flow.peek().is_verified() {
                    ui::sleep(Duration::from_secs(2)).await;
                    nav.push(Route::Login {});
                }
            });
        }
    };

    let handle_resend = {
        let gateway = gateway.clone();
        move |_| {
            let gateway = gateway.clone();
            spawn(async move {
                let phone = flow.peek().destination().to_string();
                if phone.is_empty() {
                    return;
                }
                let Some(attempt) = flow.write().begin_resend() else {
                    return;
                };
                let result = gateway.send_phone_code(&phone).await.map(|_| ());
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
                        CardTitle { "Phone Verified!" }
                        CardDescription {
                            "Your phone number has been successfully verified. Redirecting to login..."
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
                        Icon { icon: FaPhone, width: 48, height: 48 }
                    }
                    CardTitle { "Phone Verification" }
                    CardDescription {
                        if phone.is_empty() {
                            "Register first so we know where to send your code."
                        } else {
                            "We sent a verification code to {phone}"
                        }
                    }
                }
                CardContent {
                    form {
                        onsubmit: handle_verify,
                        class: "auth-form",
                        Input {
                            placeholder: "Enter 6-digit code",
                            maxlength: 6,
                            value: code(),
                            oninput: move |evt: FormEvent| code.set(evt.value()),
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            r#type: "submit",
                            disabled: flow.read().is_pending() || flow.read().resend_only(),
                            if flow.read().is_pending() { "Verifying..." } else { "Verify Phone" }
                        }
                    }

                    div { class: "auth-actions",
                        Button {
                            variant: ButtonVariant::Ghost,
                            disabled: flow.read().is_pending(),
                            onclick: handle_resend,
                            "Resend Code"
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
}
