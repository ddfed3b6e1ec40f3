mod login;
pub use login::Login;

mod registration_success;
pub use registration_success::RegistrationSuccess;

mod email_verification;
pub use email_verification::EmailVerification;

mod phone_verification;
pub use phone_verification::PhoneVerification;

mod forgot_password;
pub use forgot_password::ForgotPassword;

mod password_reset_email_sent;
pub use password_reset_email_sent::PasswordResetEmailSent;

mod password_reset_otp;
pub use password_reset_otp::PasswordResetOtp;

mod password_reset;
pub use password_reset::PasswordReset;

mod dashboard;
pub use dashboard::Dashboard;

mod plant_farming;
pub use plant_farming::PlantFarming;

mod animal_farming;
pub use animal_farming::AnimalFarming;

mod not_found;
pub use not_found::NotFound;
