// ABOUTME: Headless form logic shared by the onboarding screens
// Nothing in here touches the terminal

pub mod email;
pub mod focus;
pub mod location;
pub mod otp;
pub mod password;
pub mod text_field;
pub mod validation;

pub use email::is_valid_email;
pub use focus::FocusRing;
pub use location::{LocationError, LocationLevel, LocationSelection, LocationTable, DEFAULT_COUNTRY};
pub use otp::{OtpError, OtpState, MAX_RESEND_ATTEMPTS, OTP_LENGTH, TIMER_DURATION_SECS};
pub use password::{check_passwords, PasswordError, MIN_PASSWORD_LENGTH};
pub use text_field::TextField;
pub use validation::{FieldValue, RequiredForm, ValidationErrors};
