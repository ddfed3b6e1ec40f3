//! Entry screen: login and registration, each over either channel.

use dioxus::prelude::*;

use api::RegisterRequest;
use auth::{
    session_from_registration, validate_new_password, Channel, FlowContext, Notice,
    ValidationError, VerificationFlow,
};
use ui::components::{Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, Input};
use ui::icons::{FaEnvelope, FaPhone, FaSeedling};
use ui::{push_notice, use_auth, use_carrier, use_gateway, use_notices, use_session_store, Icon};

use crate::Route;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Login,
    Register,
}

/// Login + register tabs with the email/phone channel toggle.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // Already logged in: straight to the dashboard.
    use_effect(move || {
        if auth().is_some() {
            nav.replace(Route::Dashboard {});
        }
    });

    let mut tab = use_signal(|| Tab::Login);
    let mut channel = use_signal(|| Channel::Email);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut farm_name = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let gateway = use_gateway();
    let store = use_session_store();
    let carrier = use_carrier();
    let mut notices = use_notices();

    let handle_login = {
        let gateway = gateway.clone();
        let store = store.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let gateway = gateway.clone();
            let store = store.clone();
            spawn(async move {
                if loading() {
                    return;
                }
                let identifier = match channel() {
                    Channel::Email => email().trim().to_string(),
                    Channel::Phone => phone().trim().to_string(),
                };
                if identifier.is_empty() || password().is_empty() {
                    push_notice(
                        &mut notices,
                        Notice::error("Missing details", "Enter your identifier and password."),
                    );
                    return;
                }

                loading.set(true);
                let result = store
                    .login(&gateway, channel().into(), &identifier, &password())
                    .await;
                loading.set(false);

                match result {
                    Ok(_) => {
                        nav.push(Route::Dashboard {});
                    }
                    Err(err) => {
                        let body = match err {
                            api::GatewayError::Network(_) => {
                                "Network problem. Check your connection and try again."
                            }
                            _ => "Please check your details and try again.",
                        };
                        push_notice(&mut notices, Notice::error("Login failed", body));
                    }
                }
            });
        }
    };

    let handle_register = {
        let gateway = gateway.clone();
        let store = store.clone();
        let carrier = carrier.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let gateway = gateway.clone();
            let store = store.clone();
            let carrier = carrier.clone();
            spawn(async move {
                if loading() {
                    return;
                }
                let farm = farm_name().trim().to_string();
                let identifier = match channel() {
                    Channel::Email => email().trim().to_string(),
                    Channel::Phone => phone().trim().to_string(),
                };

                if farm.is_empty() {
                    push_notice(
                        &mut notices,
                        Notice::error("Farm name is required", "Enter a name for your farm."),
                    );
                    return;
                }
                if identifier.is_empty()
                    || (channel() == Channel::Email && !identifier.contains('@'))
                {
                    push_notice(
                        &mut notices,
                        Notice::error(
                            "Invalid contact",
                            "Enter a valid email address or phone number.",
                        ),
                    );
                    return;
                }
                if let Err(err) = validate_new_password(&password(), &confirm_password()) {
                    let title = match err {
                        ValidationError::PasswordMismatch => "Password mismatch",
                        ValidationError::PasswordTooShort => "Password too short",
                        _ => "Invalid password",
                    };
                    push_notice(&mut notices, Notice::error(title, &err.to_string()));
                    return;
                }

                loading.set(true);
                let request =
                    RegisterRequest::new(&farm, channel().into(), &identifier, &password());
                let result = gateway.register(&request).await;

                match result {
                    Ok(response) => {
                        // Some deployments hand the token straight back.
                        if let Some(session) = session_from_registration(&response, &farm) {
                            store.establish(session);
                        }

                        match channel() {
                            Channel::Email => {
                                carrier.put(FlowContext::Verification(VerificationFlow::issued(
                                    Channel::Email,
                                    identifier.clone(),
                                )));
                                push_notice(
                                    &mut notices,
                                    Notice::info(
                                        "Verification email sent",
                                        "Please check your email for the verification link.",
                                    ),
                                );
                                nav.push(Route::RegistrationSuccess {});
                            }
                            Channel::Phone => {
                                let mut flow =
                                    VerificationFlow::new(Channel::Phone, identifier.clone());
                                if let Some(attempt) = flow.begin_dispatch() {
                                    let sent =
                                        gateway.send_phone_code(&identifier).await.map(|_| ());
                                    if let Some(notice) = flow.complete_dispatch(attempt, sent) {
                                        push_notice(&mut notices, notice);
                                    }
                                }
                                carrier.put(FlowContext::Verification(flow));
                                nav.push(Route::PhoneVerification {});
                            }
                        }
                    }
                    Err(err) => {
                        let body = match err {
                            api::GatewayError::Network(_) => {
                                "Network problem. Check your connection and try again."
                            }
                            _ => "Please check your details and try again.",
                        };
                        push_notice(&mut notices, Notice::error("Registration failed", body));
                    }
                }
                loading.set(false);
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
                    CardTitle { "Farm Information Management" }
                    p { class: "card-description", "Manage your farm efficiently" }
                }
                CardContent {
                    div { class: "tabs",
                        button {
                            class: if tab() == Tab::Login { "tab tab-active" } else { "tab" },
                            onclick: move |_| tab.set(Tab::Login),
                            "Login"
                        }
                        button {
                            class: if tab() == Tab::Register { "tab tab-active" } else { "tab" },
                            onclick: move |_| tab.set(Tab::Register),
                            "Register"
                        }
                    }

                    ChannelToggle {
                        channel: channel(),
                        on_select: move |c| channel.set(c),
                    }

                    if tab() == Tab::Login {
                        form {
                            onsubmit: handle_login,
                            class: "auth-form",

                            IdentifierInput {
                                channel: channel(),
                                email: email(),
                                phone: phone(),
                                on_email: move |v| email.set(v),
                                on_phone: move |v| phone.set(v),
                            }

                            Input {
                                r#type: "password",
                                placeholder: "Enter your password",
                                value: password(),
                                oninput: move |evt: FormEvent| password.set(evt.value()),
                            }

                            Button {
                                variant: ButtonVariant::Primary,
                                r#type: "submit",
                                disabled: loading(),
                                if loading() { "Logging in..." } else { "Login" }
                            }

                            Link {
                                class: "auth-link",
                                to: Route::ForgotPassword {},
                                "Forgot your password?"
                            }
                        }
                    } else {
                        form {
                            onsubmit: handle_register,
                            class: "auth-form",

                            Input {
                                placeholder: "Enter your farm name",
                                value: farm_name(),
                                oninput: move |evt: FormEvent| farm_name.set(evt.value()),
                            }

                            IdentifierInput {
                                channel: channel(),
                                email: email(),
                                phone: phone(),
                                on_email: move |v| email.set(v),
                                on_phone: move |v| phone.set(v),
                            }

                            Input {
                                r#type: "password",
                                placeholder: "Create a password (min 8 characters)",
                                value: password(),
                                oninput: move |evt: FormEvent| password.set(evt.value()),
                            }

                            Input {
                                r#type: "password",
                                placeholder: "Confirm your password",
                                value: confirm_password(),
                                oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                            }

                            Button {
                                variant: ButtonVariant::Primary,
                                r#type: "submit",
                                disabled: loading(),
                                if loading() { "Registering..." } else { "Register Farm" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The email/phone selector both tabs share.
#[component]
fn ChannelToggle(channel: Channel, on_select: EventHandler<Channel>) -> Element {
    rsx! {
        div { class: "channel-toggle",
            button {
                r#type: "button",
                class: if channel == Channel::Email { "btn btn-primary" } else { "btn btn-outline" },
                onclick: move |_| on_select.call(Channel::Email),
                Icon { icon: FaEnvelope, width: 16, height: 16 }
                "Email"
            }
            button {
                r#type: "button",
                class: if channel == Channel::Phone { "btn btn-primary" } else { "btn btn-outline" },
                onclick: move |_| on_select.call(Channel::Phone),
                Icon { icon: FaPhone, width: 16, height: 16 }
                "Phone"
            }
        }
    }
}

#[component]
fn IdentifierInput(
    channel: Channel,
    email: String,
    phone: String,
    on_email: EventHandler<String>,
    on_phone: EventHandler<String>,
) -> Element {
    match channel {
        Channel::Email => rsx! {
            Input {
                r#type: "email",
                placeholder: "Enter your email",
                value: email,
                oninput: move |evt: FormEvent| on_email.call(evt.value()),
            }
        },
        Channel::Phone => rsx! {
            Input {
                r#type: "tel",
                placeholder: "Enter your phone number",
                value: phone,
                oninput: move |evt: FormEvent| on_phone.call(evt.value()),
            }
        },
    }
}
