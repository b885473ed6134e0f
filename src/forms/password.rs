// ABOUTME: Password length and confirmation rule shared by create and reset screens

use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Please fill in both fields.")]
    Missing { password: bool, confirm: bool },

    #[error("Password must be at least 8 characters long.")]
    TooShort,

    #[error("Passwords do not match.")]
    Mismatch,
}

impl PasswordError {
    /// Whether the password field should be highlighted
    pub fn flags_password(&self) -> bool {
        match self {
            Self::Missing { password, .. } => *password,
            Self::TooShort | Self::Mismatch => true,
        }
    }

    /// Whether the confirmation field should be highlighted
    pub fn flags_confirm(&self) -> bool {
        match self {
            Self::Missing { confirm, .. } => *confirm,
            Self::TooShort => false,
            Self::Mismatch => true,
        }
    }
}

/// Length counts characters, not bytes
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Full submit-time check: both present, long enough, identical
pub fn check_passwords(password: &str, confirm: &str) -> Result<(), PasswordError> {
    if password.is_empty() || confirm.is_empty() {
        return Err(PasswordError::Missing {
            password: password.is_empty(),
            confirm: confirm.is_empty(),
        });
    }
    if char_len(password) < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if password != confirm {
        return Err(PasswordError::Mismatch);
    }
    Ok(())
}

/// Submit gate for the create-password screen
pub fn create_ready(password: &str, confirm: &str) -> bool {
    char_len(password) >= MIN_PASSWORD_LENGTH
        && char_len(confirm) >= MIN_PASSWORD_LENGTH
        && password == confirm
}

/// Submit gate for the reset-password screen; mismatch is caught on submit
pub fn reset_ready(password: &str, confirm: &str) -> bool {
    !password.is_empty() && !confirm.is_empty() && char_len(password) >= MIN_PASSWORD_LENGTH
}
