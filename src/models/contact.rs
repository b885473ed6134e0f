// ABOUTME: Contact person, delivery expectations and payment preference

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryFrequency {
    Daily,
    Weekly,
    #[serde(rename = "As Needed")]
    AsNeeded,
}

impl DeliveryFrequency {
    pub fn all() -> &'static [DeliveryFrequency] {
        &[Self::Daily, Self::Weekly, Self::AsNeeded]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::AsNeeded => "As Needed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.label() == label)
    }

    /// Volume choices depend on the chosen frequency
    pub fn volume_options(&self) -> &'static [&'static str] {
        match self {
            Self::Daily => &[
                "Less than 5 deliveries per day",
                "5-10 deliveries per day",
                "More than 10 deliveries per day",
            ],
            Self::Weekly => &[
                "Less than 20 deliveries per week",
                "20-50 deliveries per week",
                "More than 50 deliveries per week",
            ],
            Self::AsNeeded => &["As needed (variable volume)"],
        }
    }
}

impl fmt::Display for DeliveryFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentPreference {
    #[serde(rename = "Pay-per-Delivery")]
    PayPerDelivery,
    #[serde(rename = "Wallet System")]
    Wallet,
    #[serde(rename = "Credit Invoicing (Monthly)")]
    MonthlyInvoice,
}

impl PaymentPreference {
    pub fn all() -> &'static [PaymentPreference] {
        &[Self::PayPerDelivery, Self::Wallet, Self::MonthlyInvoice]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PayPerDelivery => "Pay-per-Delivery",
            Self::Wallet => "Wallet System",
            Self::MonthlyInvoice => "Credit Invoicing (Monthly)",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.label() == label)
    }
}

/// Country dialing prefix offered by the phone field's code picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallingCode {
    pub country: &'static str,
    pub code: &'static str,
}

impl CallingCode {
    pub fn all() -> &'static [CallingCode] {
        &[
            CallingCode { country: "Nigeria", code: "234" },
            CallingCode { country: "Ghana", code: "233" },
            CallingCode { country: "Kenya", code: "254" },
            CallingCode { country: "South Africa", code: "27" },
            CallingCode { country: "United Kingdom", code: "44" },
            CallingCode { country: "United States", code: "1" },
        ]
    }

    pub fn default_code() -> Self {
        Self::all()[0]
    }

    /// Picker option text, e.g. "Nigeria (+234)"
    pub fn option_label(&self) -> String {
        format!("{} (+{})", self.country, self.code)
    }

    pub fn from_option_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.option_label() == label)
    }

    /// Full international number for a locally entered phone
    pub fn format_phone(&self, local: &str) -> String {
        let digits: String = local.chars().filter(char::is_ascii_digit).collect();
        let digits = digits.trim_start_matches('0');
        format!("+{}{}", self.code, digits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub delivery_frequency: DeliveryFrequency,
    pub delivery_volume: String,
    pub payment_preference: PaymentPreference,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_options_per_frequency() {
        assert_eq!(DeliveryFrequency::Daily.volume_options().len(), 3);
        assert_eq!(DeliveryFrequency::Weekly.volume_options().len(), 3);
        assert_eq!(
            DeliveryFrequency::AsNeeded.volume_options(),
            &["As needed (variable volume)"]
        );
    }

    #[test]
    fn test_labels_round_trip() {
        for f in DeliveryFrequency::all() {
            assert_eq!(DeliveryFrequency::from_label(f.label()), Some(*f));
        }
        for p in PaymentPreference::all() {
            assert_eq!(PaymentPreference::from_label(p.label()), Some(*p));
        }
        assert_eq!(DeliveryFrequency::from_label("Monthly"), None);
    }

    #[test]
    fn test_format_phone_strips_trunk_prefix() {
        let ng = CallingCode::default_code();
        assert_eq!(ng.format_phone("0701 234 5678"), "+2347012345678");
        assert_eq!(CallingCode::from_option_label("Ghana (+233)").map(|c| c.code), Some("233"));
    }
}
