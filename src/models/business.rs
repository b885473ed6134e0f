// ABOUTME: Business classification data model handed to the registration backend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Pharmacy,
    Hospital,
    Laboratory,
}

impl BusinessType {
    pub fn all() -> &'static [BusinessType] {
        &[Self::Pharmacy, Self::Hospital, Self::Laboratory]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Pharmacy => "pharmacy",
            Self::Hospital => "hospital",
            Self::Laboratory => "laboratory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pharmacy => "Pharmacy",
            Self::Hospital => "Hospital",
            Self::Laboratory => "Laboratory",
        }
    }

    /// Categories offered once this type is selected
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Pharmacy => &[
                "Community Retail Pharmacy",
                "Online Pharmacy",
                "Hospital Pharmacy",
                "Wholesale Pharmacy",
                "Pharmaceutical Distributor",
            ],
            Self::Hospital => &[
                "General Hospital",
                "Specialist Hospital",
                "Eye Clinic",
                "Dental Clinic",
                "ENT Clinic",
                "Fertility Clinic",
                "Other Clinic",
            ],
            Self::Laboratory => &["Diagnostic Laboratory", "Research Laboratory"],
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BusinessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown business type: {s}"))
    }
}

/// Postal address assembled from the cascading pickers and free-text fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAddress {
    pub country: String,
    pub state: String,
    pub lga: String,
    pub town: String,
    pub street_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub business_type: BusinessType,
    pub category: String,
    pub name: String,
    pub location_alias: String,
    pub address: BusinessAddress,
}
