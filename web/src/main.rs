use dioxus::prelude::*;

use ui::{AuthProvider, NoticeProvider};
use views::{
    AnimalFarming, Dashboard, EmailVerification, ForgotPassword, Login, NotFound,
    PasswordReset, PasswordResetEmailSent, PasswordResetOtp, PhoneVerification,
    PlantFarming, RegistrationSuccess,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Login {},
    #[route("/registration-success")]
    RegistrationSuccess {},
    #[route("/verify-email?:confirmation_key")]
    EmailVerification { confirmation_key: String },
    #[route("/verify-phone")]
    PhoneVerification {},
    #[route("/forgot-password")]
    ForgotPassword {},
    #[route("/password-reset-email-sent")]
    PasswordResetEmailSent {},
    #[route("/password-reset-otp")]
    PasswordResetOtp {},
    #[route("/password-reset?:uid&:token")]
    PasswordReset { uid: String, token: String },
    #[route("/dashboard")]
    Dashboard {},
    #[route("/plant-farming")]
    PlantFarming {},
    #[route("/animal-farming")]
    AnimalFarming {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            NoticeProvider {
                Router::<Route> {}
            }
        }
    }
}
