// ABOUTME: Auth/registration backend boundary used by every submitting screen
// The only implementation today is a simulator with fixed delays

pub mod simulated;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::models::{AccountId, BusinessProfile, ContactDetails, Secret};

pub use simulated::SimulatedBackend;

/// Every call a screen can make against the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RequestOtp,
    VerifyOtp,
    ResendOtp,
    SetPassword,
    SendResetLink,
    ResetPassword,
    Login,
    RegisterBusiness,
    SaveContactPerson,
    CreateAccount,
}

impl Operation {
    pub fn all() -> &'static [Operation] {
        &[
            Self::RequestOtp,
            Self::VerifyOtp,
            Self::ResendOtp,
            Self::SetPassword,
            Self::SendResetLink,
            Self::ResetPassword,
            Self::Login,
            Self::RegisterBusiness,
            Self::SaveContactPerson,
            Self::CreateAccount,
        ]
    }

    /// Kebab-case name used in config `fail_operations`
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequestOtp => "request-otp",
            Self::VerifyOtp => "verify-otp",
            Self::ResendOtp => "resend-otp",
            Self::SetPassword => "set-password",
            Self::SendResetLink => "send-reset-link",
            Self::ResetPassword => "reset-password",
            Self::Login => "login",
            Self::RegisterBusiness => "register-business",
            Self::SaveContactPerson => "save-contact-person",
            Self::CreateAccount => "create-account",
        }
    }

    /// Generic retry message shown when the call fails without a server reason
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::RequestOtp => "Failed to send OTP. Please try again.",
            Self::VerifyOtp => "Verification failed. Please try again.",
            Self::ResendOtp => "Failed to resend OTP. Please try again.",
            Self::SetPassword => "Failed to create password. Please try again.",
            Self::SendResetLink => "Failed to send reset link. Please try again.",
            Self::ResetPassword => "Failed to reset password. Please try again.",
            Self::Login => "Login failed. Please try again.",
            Self::RegisterBusiness => "Failed to proceed. Please try again.",
            Self::SaveContactPerson => "Something went wrong. Please try again.",
            Self::CreateAccount => "Failed to create account. Please try again.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The server understood the request and refused it
    #[error("{0}")]
    Rejected(String),

    #[error("Service unavailable. Please try again later.")]
    Unavailable,

    /// Injected failure from the simulator
    #[error("{}", .operation.failure_message())]
    Simulated { operation: Operation },
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn request_otp(&self, email: &str) -> Result<(), BackendError>;

    async fn verify_otp(&self, email: &str, code: &Secret) -> Result<(), BackendError>;

    async fn resend_otp(&self, email: &str) -> Result<(), BackendError>;

    async fn set_password(&self, password: &Secret) -> Result<(), BackendError>;

    async fn send_reset_link(&self, email: &str) -> Result<(), BackendError>;

    async fn reset_password(&self, token: &str, password: &Secret) -> Result<(), BackendError>;

    async fn login(&self, email: &str, password: &Secret, remember: bool) -> Result<(), BackendError>;

    async fn register_business(&self, profile: &BusinessProfile) -> Result<(), BackendError>;

    async fn save_contact_person(&self, contact: &ContactDetails) -> Result<(), BackendError>;

    async fn create_account(&self) -> Result<AccountId, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_are_unique() {
        let mut names: Vec<_> = Operation::all().iter().map(Operation::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Operation::all().len());
    }

    #[test]
    fn test_simulated_error_uses_operation_message() {
        let err = BackendError::Simulated { operation: Operation::ResendOtp };
        assert_eq!(err.to_string(), "Failed to resend OTP. Please try again.");
    }
}
