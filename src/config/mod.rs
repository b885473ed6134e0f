// ABOUTME: Configuration management for bizauth
// Handles simulated backend timing, carousel pacing, location data source and UI tick rate

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::Operation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    /// Simulated backend behaviour
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Onboarding carousel pacing
    #[serde(default)]
    pub carousel: CarouselConfig,

    /// Reference data for the address pickers
    #[serde(default)]
    pub locations: LocationsConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

/// Fixed delays (milliseconds) standing in for network round trips
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_request_otp_ms")]
    pub request_otp_ms: u64,
    #[serde(default = "default_verify_otp_ms")]
    pub verify_otp_ms: u64,
    #[serde(default = "default_resend_otp_ms")]
    pub resend_otp_ms: u64,
    #[serde(default = "default_set_password_ms")]
    pub set_password_ms: u64,
    #[serde(default = "default_send_reset_link_ms")]
    pub send_reset_link_ms: u64,
    #[serde(default = "default_reset_password_ms")]
    pub reset_password_ms: u64,
    #[serde(default = "default_login_ms")]
    pub login_ms: u64,
    #[serde(default = "default_register_business_ms")]
    pub register_business_ms: u64,
    #[serde(default = "default_save_contact_person_ms")]
    pub save_contact_person_ms: u64,
    #[serde(default = "default_create_account_ms")]
    pub create_account_ms: u64,

    /// Operation names (kebab-case) that should fail, for exercising error paths
    #[serde(default)]
    pub fail_operations: Vec<String>,

    /// Every operation reports the service as unreachable
    #[serde(default)]
    pub offline: bool,
}

impl SimulationConfig {
    pub fn delay_for(&self, operation: Operation) -> Duration {
        let ms = match operation {
            Operation::RequestOtp => self.request_otp_ms,
            Operation::VerifyOtp => self.verify_otp_ms,
            Operation::ResendOtp => self.resend_otp_ms,
            Operation::SetPassword => self.set_password_ms,
            Operation::SendResetLink => self.send_reset_link_ms,
            Operation::ResetPassword => self.reset_password_ms,
            Operation::Login => self.login_ms,
            Operation::RegisterBusiness => self.register_business_ms,
            Operation::SaveContactPerson => self.save_contact_person_ms,
            Operation::CreateAccount => self.create_account_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn should_fail(&self, operation: Operation) -> bool {
        self.fail_operations
            .iter()
            .any(|name| name.trim().eq_ignore_ascii_case(operation.name()))
    }

    /// All delays zeroed; used by tests and the `--instant` flag
    pub fn instant() -> Self {
        Self {
            request_otp_ms: 0,
            verify_otp_ms: 0,
            resend_otp_ms: 0,
            set_password_ms: 0,
            send_reset_link_ms: 0,
            reset_password_ms: 0,
            login_ms: 0,
            register_business_ms: 0,
            save_contact_person_ms: 0,
            create_account_ms: 0,
            fail_operations: Vec::new(),
            offline: false,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            request_otp_ms: default_request_otp_ms(),
            verify_otp_ms: default_verify_otp_ms(),
            resend_otp_ms: default_resend_otp_ms(),
            set_password_ms: default_set_password_ms(),
            send_reset_link_ms: default_send_reset_link_ms(),
            reset_password_ms: default_reset_password_ms(),
            login_ms: default_login_ms(),
            register_business_ms: default_register_business_ms(),
            save_contact_person_ms: default_save_contact_person_ms(),
            create_account_ms: default_create_account_ms(),
            fail_operations: Vec::new(),
            offline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Time each slide stays up before advancing
    #[serde(default = "default_auto_advance_ms")]
    pub auto_advance_ms: u64,
}

impl CarouselConfig {
    pub fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms.max(1))
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: default_auto_advance_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationsConfig {
    /// JSON file replacing the built-in country/state/LGA/town table
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Draw/poll interval of the terminal loop
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_request_otp_ms() -> u64 {
    1000
}

fn default_verify_otp_ms() -> u64 {
    1500
}

fn default_resend_otp_ms() -> u64 {
    1000
}

fn default_set_password_ms() -> u64 {
    1200
}

fn default_send_reset_link_ms() -> u64 {
    1500
}

fn default_reset_password_ms() -> u64 {
    1500
}

fn default_login_ms() -> u64 {
    1000
}

fn default_register_business_ms() -> u64 {
    1500
}

fn default_save_contact_person_ms() -> u64 {
    1400
}

fn default_create_account_ms() -> u64 {
    1500
}

fn default_auto_advance_ms() -> u64 {
    3000
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl AppConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        for path in Self::get_config_paths() {
            if path.exists() {
                let file_config = Self::load_from(&path)?;
                config.merge(file_config);
            }
        }

        Ok(config)
    }

    /// Load a single config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save configuration to user config directory
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::get_user_config_dir()?;
        self.save_to(&config_dir.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get configuration file paths in order of precedence (later wins)
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        // 1. User config (~/.bizauth/config/config.toml)
        if let Ok(config_dir) = Self::get_user_config_dir() {
            paths.push(config_dir.join("config.toml"));
        }

        // 2. Local project config
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".bizauth").join("config.toml"));
        }

        paths
    }

    /// Get user configuration directory
    pub fn get_user_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home_dir.join(".bizauth").join("config"))
    }

    /// Merge another config into this one; sections that differ from defaults win
    fn merge(&mut self, other: AppConfig) {
        if other.simulation != SimulationConfig::default() {
            self.simulation = other.simulation;
        }
        if other.carousel != CarouselConfig::default() {
            self.carousel = other.carousel;
        }
        if other.locations.data_file.is_some() {
            self.locations = other.locations;
        }
        if other.ui != UiConfig::default() {
            self.ui = other.ui;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            simulation: SimulationConfig::default(),
            carousel: CarouselConfig::default(),
            locations: LocationsConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.carousel.auto_advance_ms, 3000);
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert_eq!(
            config.simulation.delay_for(Operation::SaveContactPerson),
            Duration::from_millis(1400)
        );
        assert!(config.locations.data_file.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[simulation]\nlogin_ms = 10\nfail_operations = [\"verify-otp\"]\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.simulation.login_ms, 10);
        assert_eq!(config.simulation.verify_otp_ms, 1500);
        assert!(config.simulation.should_fail(Operation::VerifyOtp));
        assert!(!config.simulation.should_fail(Operation::Login));
        assert!(!config.simulation.offline);
        assert_eq!(config.carousel, CarouselConfig::default());
    }

    #[test]
    fn test_merge_keeps_defaults_for_untouched_sections() {
        let mut base = AppConfig::default();
        let mut other = AppConfig::default();
        other.ui.tick_rate_ms = 100;
        base.merge(other);
        assert_eq!(base.ui.tick_rate_ms, 100);
        assert_eq!(base.simulation, SimulationConfig::default());
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[ui\ntick_rate_ms = ").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
