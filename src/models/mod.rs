// ABOUTME: Typed payloads exchanged between screens and the auth backend

pub mod account;
pub mod business;
pub mod contact;

pub use account::{AccountId, Registrant, Secret};
pub use business::{BusinessAddress, BusinessProfile, BusinessType};
pub use contact::{CallingCode, ContactDetails, DeliveryFrequency, PaymentPreference};
