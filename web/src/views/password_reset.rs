//! Final recovery step: choose the new password. The phone branch arrives
//! here with its verified code in the flow; the email branch arrives through
//! the emailed link, whose uid/token pair rides in as query parameters.

use dioxus::prelude::*;

use auth::{Notice, RecoveryFlow, ResetSubmission, ValidationError};
use ui::components::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, Input,
};
use ui::icons::FaLock;
use ui::{push_notice, use_carrier, use_gateway, use_notices, Icon};

use crate::Route;

#[component]
pub fn PasswordReset(uid: String, token: String) -> Element {
    let carrier = use_carrier();
    let gateway = use_gateway();
    let mut notices = use_notices();
    let nav = use_navigator();

    let mut flow = use_signal({
        let carrier = carrier.clone();
        let uid = uid.clone();
        let token = token.clone();
        move || {
            let from_url = !uid.is_empty() && !token.is_empty();
            match carrier.take_recovery() {
                Some(mut flow) => {
                    if from_url {
                        flow.adopt_link(uid.clone(), token.clone());
                    }
                    flow
                }
                // The common email case: a fresh browser context, the link
                // alone carries the proof.
                None if from_url => RecoveryFlow::from_link(uid.clone(), token.clone()),
                None => RecoveryFlow::new_email(""),
            }
        }
    });

    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);

    let handle_submit = {
        let gateway = gateway.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let gateway = gateway.clone();
            spawn(async move {
                let new_password = password();
                let attempt = match flow.write().submit_password(&new_password, &confirm_password()) {
                    Ok(attempt) => attempt,
                    Err(err) => {
                        let title = match err {
                            ValidationError::PasswordMismatch => "Password mismatch",
                            ValidationError::PasswordTooShort => "Password too short",
                            _ => "Cannot reset password",
                        };
                        push_notice(&mut notices, Notice::error(title, &err.to_string()));
                        return;
                    }
                };

                let result = match flow.peek().submission() {
                    Some(ResetSubmission::Phone { phone, code }) => gateway
                        .confirm_reset_by_phone(&phone, &code, &new_password)
                        .await
                        .map(|_| ()),
                    Some(ResetSubmission::Email { uid, token }) => gateway
                        .confirm_reset_by_email(&uid, &token, &new_password)
                        .await
                        .map(|_| ()),
                    None => Err(api::GatewayError::Unexpected(
                        "recovery context is missing".into(),
                    )),
                };

                let notice = flow.write().complete_submit(attempt, result);
                if let Some(notice) = notice {
                    push_notice(&mut notices, notice);
                }
                if flow.peek().is_done() {
                    nav.push(Route::Login {});
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
                        Icon { icon: FaLock, width: 48, height: 48 }
                    }
                    CardTitle { "Set New Password" }
                    CardDescription { "Enter your new password below" }
                }
                CardContent {
                    form {
                        onsubmit: handle_submit,
                        class: "auth-form",
                        Input {
                            r#type: "password",
                            placeholder: "Enter new password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                        Input {
                            r#type: "password",
                            placeholder: "Confirm new password",
                            value: confirm_password(),
                            oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            r#type: "submit",
                            disabled: flow.read().is_pending(),
                            if flow.read().is_pending() { "Resetting..." } else { "Reset Password" }
                        }
                    }
                }
            }
        }
    }
}
