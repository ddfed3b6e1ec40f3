//! Phone branch intermediate step: verify the SMS code before the new
//! password may be chosen.

use dioxus::prelude::*;

use auth::{FlowContext, RecoveryFlow, RecoveryState};
use ui::components::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, Input,
};
use ui::icons::FaPhone;
use ui::{push_notice, use_carrier, use_gateway, use_notices, Icon};

use crate::Route;

#[component]
pub fn PasswordResetOtp() -> Element {
    let carrier = use_carrier();
    let gateway = use_gateway();
    let mut notices = use_notices();
    let nav = use_navigator();

    let mut flow = use_signal({
        let carrier = carrier.clone();
        move || {
            carrier
                .take_recovery()
                .unwrap_or_else(|| RecoveryFlow::new_phone(""))
        }
    });
    let mut code = use_signal(String::new);

    let phone = flow.read().destination().to_string();
    let usable = !phone.is_empty() && flow.read().state() == RecoveryState::ChallengeDispatched;

    let handle_verify = {
        let gateway = gateway.clone();
        let carrier = carrier.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let gateway = gateway.clone();
            let carrier = carrier.clone();
            spawn(async move {
                let phone = flow.peek().destination().to_string();
                let entered = code().trim().to_string();
                if entered.is_empty() || phone.is_empty() {
                    return;
                }
                let Some(attempt) = flow.write().begin_verify_code() else {
                    return;
                };
                let result = gateway.verify_reset_code(&phone, &entered).await.map(|_| ());
                let notice = flow.write().complete_verify_code(attempt, &entered, result);
                if let Some(notice) = notice {
                    push_notice(&mut notices, notice);
                }
                if flow.peek().state() == RecoveryState::CodeVerified {
                    carrier.put(FlowContext::Recovery(flow.peek().clone()));
                    nav.push(Route::PasswordReset {
                        uid: String::new(),
                        token: String::new(),
                    });
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
                let result = gateway.initiate_reset_by_phone(&phone).await.map(|_| ());
                let notice = flow.write().complete_resend(attempt, result);
                if let Some(notice) = notice {
                    push_notice(&mut notices, notice);
                }
            });
        }
    };

    rsx! {
        div {
            class: "auth-page",
            Card {
                class: "auth-card",
                CardHeader {
                    div { class: "status-icon",
                        Icon { icon: FaPhone, width: 48, height: 48 }
                    }
                    CardTitle { "Verify Phone Number" }
                    CardDescription {
                        if phone.is_empty() {
                            "Start from the reset options so we know where to send your code."
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
                            disabled: flow.read().is_pending() || !usable,
                            if flow.read().is_pending() { "Verifying..." } else { "Verify Code" }
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
                            onclick: move |_| { nav.push(Route::ForgotPassword {}); },
                            "Back to Reset Options"
                        }
                    }
                }
            }
        }
    }
}
