// ABOUTME: Backend calls requested by screens and the outcomes delivered back to them

use tracing::{info, warn};

use crate::backend::{AuthBackend, BackendError, Operation};
use crate::models::{AccountId, BusinessProfile, ContactDetails, Secret};

/// Work a screen hands to the app loop; executed off the UI path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncAction {
    RequestOtp { email: String },
    VerifyOtp { email: String, code: Secret },
    ResendOtp { email: String },
    SetPassword { password: Secret },
    SendResetLink { email: String },
    ResetPassword { token: String, password: Secret },
    Login { email: String, password: Secret, remember: bool },
    RegisterBusiness(BusinessProfile),
    SaveContactPerson(ContactDetails),
    CreateAccount,
}

impl AsyncAction {
    pub fn operation(&self) -> Operation {
        match self {
            Self::RequestOtp { .. } => Operation::RequestOtp,
            Self::VerifyOtp { .. } => Operation::VerifyOtp,
            Self::ResendOtp { .. } => Operation::ResendOtp,
            Self::SetPassword { .. } => Operation::SetPassword,
            Self::SendResetLink { .. } => Operation::SendResetLink,
            Self::ResetPassword { .. } => Operation::ResetPassword,
            Self::Login { .. } => Operation::Login,
            Self::RegisterBusiness(_) => Operation::RegisterBusiness,
            Self::SaveContactPerson(_) => Operation::SaveContactPerson,
            Self::CreateAccount => Operation::CreateAccount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    OtpRequested(Result<(), BackendError>),
    OtpVerified(Result<(), BackendError>),
    OtpResent(Result<(), BackendError>),
    PasswordSet(Result<(), BackendError>),
    ResetLinkSent(Result<(), BackendError>),
    PasswordReset(Result<(), BackendError>),
    LoggedIn(Result<(), BackendError>),
    BusinessRegistered(Result<(), BackendError>),
    ContactSaved(Result<(), BackendError>),
    AccountCreated(Result<AccountId, BackendError>),
}

impl ActionOutcome {
    pub fn operation(&self) -> Operation {
        match self {
            Self::OtpRequested(_) => Operation::RequestOtp,
            Self::OtpVerified(_) => Operation::VerifyOtp,
            Self::OtpResent(_) => Operation::ResendOtp,
            Self::PasswordSet(_) => Operation::SetPassword,
            Self::ResetLinkSent(_) => Operation::SendResetLink,
            Self::PasswordReset(_) => Operation::ResetPassword,
            Self::LoggedIn(_) => Operation::Login,
            Self::BusinessRegistered(_) => Operation::RegisterBusiness,
            Self::ContactSaved(_) => Operation::SaveContactPerson,
            Self::AccountCreated(_) => Operation::CreateAccount,
        }
    }

    pub fn error(&self) -> Option<&BackendError> {
        match self {
            Self::OtpRequested(r)
            | Self::OtpVerified(r)
            | Self::OtpResent(r)
            | Self::PasswordSet(r)
            | Self::ResetLinkSent(r)
            | Self::PasswordReset(r)
            | Self::LoggedIn(r)
            | Self::BusinessRegistered(r)
            | Self::ContactSaved(r) => r.as_ref().err(),
            Self::AccountCreated(r) => r.as_ref().err(),
        }
    }
}

/// Run one action against the backend
pub async fn execute(action: AsyncAction, backend: &dyn AuthBackend) -> ActionOutcome {
    let operation = action.operation();
    info!("Executing {}", operation);

    let outcome = match action {
        AsyncAction::RequestOtp { email } => ActionOutcome::OtpRequested(backend.request_otp(&email).await),
        AsyncAction::VerifyOtp { email, code } => {
            ActionOutcome::OtpVerified(backend.verify_otp(&email, &code).await)
        }
        AsyncAction::ResendOtp { email } => ActionOutcome::OtpResent(backend.resend_otp(&email).await),
        AsyncAction::SetPassword { password } => {
            ActionOutcome::PasswordSet(backend.set_password(&password).await)
        }
        AsyncAction::SendResetLink { email } => {
            ActionOutcome::ResetLinkSent(backend.send_reset_link(&email).await)
        }
        AsyncAction::ResetPassword { token, password } => {
            ActionOutcome::PasswordReset(backend.reset_password(&token, &password).await)
        }
        AsyncAction::Login { email, password, remember } => {
            ActionOutcome::LoggedIn(backend.login(&email, &password, remember).await)
        }
        AsyncAction::RegisterBusiness(profile) => {
            ActionOutcome::BusinessRegistered(backend.register_business(&profile).await)
        }
        AsyncAction::SaveContactPerson(contact) => {
            ActionOutcome::ContactSaved(backend.save_contact_person(&contact).await)
        }
        AsyncAction::CreateAccount => ActionOutcome::AccountCreated(backend.create_account().await),
    };

    match outcome.error() {
        Some(e) => warn!("{} failed: {}", operation, e),
        None => info!("{} succeeded", operation),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SimulatedBackend;
    use crate::config::SimulationConfig;

    #[tokio::test]
    async fn test_execute_maps_action_to_outcome() {
        let backend = SimulatedBackend::new(SimulationConfig::instant());
        let outcome = execute(
            AsyncAction::ResendOtp { email: "a@b.co".to_string() },
            &backend,
        )
        .await;
        assert_eq!(outcome, ActionOutcome::OtpResent(Ok(())));
        assert_eq!(outcome.operation(), Operation::ResendOtp);
    }

    #[tokio::test]
    async fn test_failed_outcome_exposes_error() {
        let mut config = SimulationConfig::instant();
        config.fail_operations = vec!["login".to_string()];
        let backend = SimulatedBackend::new(config);

        let outcome = execute(
            AsyncAction::Login {
                email: "a@b.co".to_string(),
                password: Secret::new("password1"),
                remember: true,
            },
            &backend,
        )
        .await;
        assert_eq!(
            outcome.error().map(ToString::to_string).as_deref(),
            Some("Login failed. Please try again.")
        );
    }

    #[test]
    fn test_action_debug_hides_secrets() {
        let action = AsyncAction::SetPassword { password: Secret::new("topsecret1") };
        assert!(!format!("{action:?}").contains("topsecret1"));
    }
}
