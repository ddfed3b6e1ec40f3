//! Recovery entry: choose a channel, dispatch the challenge, hand the flow
//! to the next step.

use dioxus::prelude::*;

use auth::{Channel, FlowContext, Notice, RecoveryFlow, RecoveryState};
use ui::components::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, Input,
};
use ui::icons::{FaArrowLeft, FaEnvelope, FaPhone, FaSeedling};
use ui::{push_notice, use_carrier, use_gateway, use_notices, Icon};

use crate::Route;

#[component]
pub fn ForgotPassword() -> Element {
    let carrier = use_carrier();
    let gateway = use_gateway();
    let mut notices = use_notices();
    let nav = use_navigator();

    let mut method = use_signal(|| Channel::Email);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let handle_submit = {
        let gateway = gateway.clone();
        let carrier = carrier.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let gateway = gateway.clone();
            let carrier = carrier.clone();
            spawn(async move {
                if loading() {
                    return;
                }
                let destination = match method() {
                    Channel::Email => email().trim().to_string(),
                    Channel::Phone => phone().trim().to_string(),
                };
                if destination.is_empty() {
                    push_notice(
                        &mut notices,
                        Notice::error(
                            "Missing details",
                            "Enter the email or phone number you registered with.",
                        ),
                    );
                    return;
                }

                let mut flow = match method() {
                    Channel::Email => RecoveryFlow::new_email(destination.clone()),
                    Channel::Phone => RecoveryFlow::new_phone(destination.clone()),
                };
                let Some(attempt) = flow.begin_dispatch() else {
                    return;
                };

                loading.set(true);
                let result = match method() {
                    Channel::Email => gateway.initiate_reset_by_email(&destination).await,
                    Channel::Phone => gateway.initiate_reset_by_phone(&destination).await,
                }
                .map(|_| ());
                loading.set(false);

                if let Some(notice) = flow.complete_dispatch(attempt, result) {
                    push_notice(&mut notices, notice);
                }

                if flow.state() == RecoveryState::ChallengeDispatched {
                    let next = match flow.channel() {
                        Channel::Email => Route::PasswordResetEmailSent {},
                        Channel::Phone => Route::PasswordResetOtp {},
                    };
                    carrier.put(FlowContext::Recovery(flow));
                    nav.push(next);
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
                    div { class: "auth-logo",
                        Icon { icon: FaSeedling, width: 32, height: 32 }
                    }
                    CardTitle { "Reset Password" }
                    CardDescription {
                        "Enter your email or phone number to reset your password"
                    }
                }
                CardContent {
                    form {
                        onsubmit: handle_submit,
                        class: "auth-form",

                        div { class: "channel-toggle",
                            button {
                                r#type: "button",
                                class: if method() == Channel::Email { "btn btn-primary" } else { "btn btn-outline" },
                                onclick: move |_| method.set(Channel::Email),
                                Icon { icon: FaEnvelope, width: 16, height: 16 }
                                "Email"
                            }
                            button {
                                r#type: "button",
                                class: if method() == Channel::Phone { "btn btn-primary" } else { "btn btn-outline" },
                                onclick: move |_| method.set(Channel::Phone),
                                Icon { icon: FaPhone, width: 16, height: 16 }
                                "Phone"
                            }
                        }

                        if method() == Channel::Email {
                            Input {
                                r#type: "email",
                                placeholder: "Enter your email",
                                value: email(),
                                oninput: move |evt: FormEvent| email.set(evt.value()),
                            }
                        } else {
                            Input {
                                r#type: "tel",
                                placeholder: "Enter your phone number",
                                value: phone(),
                                oninput: move |evt: FormEvent| phone.set(evt.value()),
                            }
                        }

                        Button {
                            variant: ButtonVariant::Primary,
                            r#type: "submit",
                            disabled: loading(),
                            if loading() { "Sending..." } else { "Send Reset Instructions" }
                        }

                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| { nav.push(Route::Login {}); },
                            Icon { icon: FaArrowLeft, width: 14, height: 14 }
                            "Back to Login"
                        }
                    }
                }
            }
        }
    }
}
