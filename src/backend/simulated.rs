// ABOUTME: Stand-in backend that sleeps for a configured delay, then succeeds or fails on request

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{AuthBackend, BackendError, Operation};
use crate::config::SimulationConfig;
use crate::models::{AccountId, BusinessProfile, ContactDetails, Secret};

#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    config: SimulationConfig,
}

impl SimulatedBackend {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    async fn simulate(&self, operation: Operation) -> Result<(), BackendError> {
        let delay = self.config.delay_for(operation);
        debug!("Simulating {} ({}ms)", operation, delay.as_millis());
        tokio::time::sleep(delay).await;

        if self.config.offline {
            warn!("Simulated outage for {}", operation);
            return Err(BackendError::Unavailable);
        }
        if self.config.should_fail(operation) {
            warn!("Injected failure for {}", operation);
            return Err(BackendError::Simulated { operation });
        }
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for SimulatedBackend {
    async fn request_otp(&self, email: &str) -> Result<(), BackendError> {
        info!("Requesting OTP for {}", email);
        self.simulate(Operation::RequestOtp).await
    }

    async fn verify_otp(&self, email: &str, _code: &Secret) -> Result<(), BackendError> {
        info!("Verifying OTP for {}", email);
        self.simulate(Operation::VerifyOtp).await
    }

    async fn resend_otp(&self, email: &str) -> Result<(), BackendError> {
        info!("Resending OTP to {}", email);
        self.simulate(Operation::ResendOtp).await
    }

    async fn set_password(&self, _password: &Secret) -> Result<(), BackendError> {
        self.simulate(Operation::SetPassword).await
    }

    async fn send_reset_link(&self, email: &str) -> Result<(), BackendError> {
        info!("Sending password reset link to {}", email);
        self.simulate(Operation::SendResetLink).await
    }

    async fn reset_password(&self, _token: &str, _password: &Secret) -> Result<(), BackendError> {
        self.simulate(Operation::ResetPassword).await
    }

    async fn login(&self, email: &str, _password: &Secret, remember: bool) -> Result<(), BackendError> {
        info!("Logging in {} (remember: {})", email, remember);
        self.simulate(Operation::Login).await
    }

    async fn register_business(&self, profile: &BusinessProfile) -> Result<(), BackendError> {
        info!(
            "Registering {} business {:?} in {}",
            profile.business_type, profile.name, profile.address.state
        );
        self.simulate(Operation::RegisterBusiness).await
    }

    async fn save_contact_person(&self, contact: &ContactDetails) -> Result<(), BackendError> {
        info!(
            "Saving contact person {} {} ({})",
            contact.first_name, contact.last_name, contact.delivery_frequency
        );
        self.simulate(Operation::SaveContactPerson).await
    }

    async fn create_account(&self) -> Result<AccountId, BackendError> {
        self.simulate(Operation::CreateAccount).await?;
        let id = AccountId::new();
        info!("Created account {}", id);
        Ok(id)
    }
}
