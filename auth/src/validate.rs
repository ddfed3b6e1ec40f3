//! Client-side password preconditions.
//!
//! These run before any network call and their failures never reach the
//! gateway. The same checks gate registration and password recovery.

use thiserror::Error;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A precondition the user's input failed locally.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please ensure both passwords match.")]
    PasswordMismatch,

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters long.")]
    PasswordTooShort,

    #[error("This reset link is incomplete. Request a new one.")]
    MissingResetToken,

    #[error("Verify your reset code before choosing a new password.")]
    NotReadyForPassword,
}

/// Check a new password and its confirmation. Mismatch is reported before
/// length, matching what the screens display.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_long_password() {
        assert_eq!(validate_new_password("Abcd1234", "Abcd1234"), Ok(()));
    }

    #[test]
    fn rejects_short_password() {
        assert_eq!(
            validate_new_password("short1", "short1"),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn rejects_mismatch_even_when_long_enough() {
        assert_eq!(
            validate_new_password("Abcd1234", "Abcd9999"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn mismatch_wins_over_length() {
        assert_eq!(
            validate_new_password("a", "b"),
            Err(ValidationError::PasswordMismatch)
        );
    }
}
