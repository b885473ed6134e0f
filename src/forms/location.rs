// ABOUTME: Static country -> state -> LGA -> town lookup table and cascading selection
// Selecting a level clears every level below it; option lists are derived from the table

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

const EMBEDDED_LOCATIONS: &str = include_str!("../../data/locations.json");

/// Country preselected on the business classification screen
pub const DEFAULT_COUNTRY: &str = "Nigeria";

/// Nested reference data, loaded once and read-only afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationTable {
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub states_by_country: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub lgas_by_state: BTreeMap<String, Vec<String>>,
    #[serde(default, rename = "townsByLGA")]
    pub towns_by_lga: BTreeMap<String, Vec<String>>,
}

impl LocationTable {
    /// Table compiled into the binary
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(EMBEDDED_LOCATIONS).context("Failed to parse embedded location data")
    }

    /// Load a table with the same JSON shape from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read location data from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse location data from {}", path.display()))
    }

    /// Use the override file when configured, otherwise the embedded table
    pub fn load(data_file: Option<&Path>) -> Result<Self> {
        match data_file {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    pub fn states(&self, country: &str) -> &[String] {
        self.states_by_country.get(country).map_or(&[], Vec::as_slice)
    }

    pub fn lgas(&self, state: &str) -> &[String] {
        self.lgas_by_state.get(state).map_or(&[], Vec::as_slice)
    }

    pub fn towns(&self, lga: &str) -> &[String] {
        self.towns_by_lga.get(lga).map_or(&[], Vec::as_slice)
    }
}

/// One level of the address hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LocationLevel {
    Country,
    State,
    Lga,
    Town,
}

impl LocationLevel {
    pub fn all() -> &'static [LocationLevel] {
        &[Self::Country, Self::State, Self::Lga, Self::Town]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::State => "State",
            Self::Lga => "LGA",
            Self::Town => "Town / Area",
        }
    }

    pub fn parent(&self) -> Option<Self> {
        match self {
            Self::Country => None,
            Self::State => Some(Self::Country),
            Self::Lga => Some(Self::State),
            Self::Town => Some(Self::Lga),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("{value:?} is not a valid {level} option")]
    UnknownOption { level: &'static str, value: String },

    #[error("Select a {0} first")]
    ParentNotSelected(&'static str),
}

/// Current address selection; empty strings mean "nothing selected"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSelection {
    country: String,
    state: String,
    lga: String,
    town: String,
}

impl LocationSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(country: &str) -> Self {
        Self {
            country: country.to_string(),
            ..Self::default()
        }
    }

    pub fn get(&self, level: LocationLevel) -> &str {
        match level {
            LocationLevel::Country => &self.country,
            LocationLevel::State => &self.state,
            LocationLevel::Lga => &self.lga,
            LocationLevel::Town => &self.town,
        }
    }

    /// A level is disabled until its parent has a selection
    pub fn is_disabled(&self, level: LocationLevel) -> bool {
        level.parent().is_some_and(|parent| self.get(parent).is_empty())
    }

    /// Options for a level, derived from the parent selection
    pub fn options<'t>(&self, table: &'t LocationTable, level: LocationLevel) -> &'t [String] {
        match level {
            LocationLevel::Country => &table.countries,
            LocationLevel::State => table.states(&self.country),
            LocationLevel::Lga => table.lgas(&self.state),
            LocationLevel::Town => table.towns(&self.lga),
        }
    }

    /// Select a value and clear every level below it
    pub fn select(
        &mut self,
        table: &LocationTable,
        level: LocationLevel,
        value: &str,
    ) -> Result<(), LocationError> {
        if self.is_disabled(level) {
            let parent = level.parent().map_or("", |p| p.label());
            return Err(LocationError::ParentNotSelected(parent));
        }
        if !self.options(table, level).iter().any(|option| option == value) {
            return Err(LocationError::UnknownOption {
                level: level.label(),
                value: value.to_string(),
            });
        }

        let value = value.to_string();
        match level {
            LocationLevel::Country => {
                self.country = value;
                self.state.clear();
                self.lga.clear();
                self.town.clear();
            }
            LocationLevel::State => {
                self.state = value;
                self.lga.clear();
                self.town.clear();
            }
            LocationLevel::Lga => {
                self.lga = value;
                self.town.clear();
            }
            LocationLevel::Town => self.town = value,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> LocationTable {
        LocationTable::embedded().unwrap()
    }

    fn lagos_selection(table: &LocationTable) -> LocationSelection {
        let mut selection = LocationSelection::with_country(DEFAULT_COUNTRY);
        selection.select(table, LocationLevel::State, "Lagos").unwrap();
        selection.select(table, LocationLevel::Lga, "Ikeja").unwrap();
        selection.select(table, LocationLevel::Town, "Allen").unwrap();
        selection
    }

    #[test]
    fn test_embedded_table_parses() {
        let table = table();
        assert!(table.countries.contains(&DEFAULT_COUNTRY.to_string()));
        assert!(!table.states(DEFAULT_COUNTRY).is_empty());
        assert!(table.states("Atlantis").is_empty());
    }

    #[test]
    fn test_child_levels_disabled_until_parent_selected() {
        let selection = LocationSelection::new();
        assert!(!selection.is_disabled(LocationLevel::Country));
        assert!(selection.is_disabled(LocationLevel::State));
        assert!(selection.is_disabled(LocationLevel::Lga));
        assert!(selection.is_disabled(LocationLevel::Town));
    }

    #[test]
    fn test_new_country_clears_descendants() {
        let table = table();
        let mut selection = lagos_selection(&table);
        assert_eq!(selection.get(LocationLevel::Town), "Allen");

        selection.select(&table, LocationLevel::Country, "Ghana").unwrap();

        assert_eq!(selection.get(LocationLevel::Country), "Ghana");
        for level in [LocationLevel::State, LocationLevel::Lga, LocationLevel::Town] {
            assert_eq!(selection.get(level), "");
        }
        assert!(selection.options(&table, LocationLevel::Lga).is_empty());
        assert!(selection.options(&table, LocationLevel::Town).is_empty());
        assert!(selection.is_disabled(LocationLevel::Lga));
        assert!(!selection.options(&table, LocationLevel::State).is_empty());
    }

    #[test]
    fn test_reselecting_same_country_still_clears() {
        let table = table();
        let mut selection = lagos_selection(&table);
        selection.select(&table, LocationLevel::Country, DEFAULT_COUNTRY).unwrap();
        assert_eq!(selection.get(LocationLevel::State), "");
    }

    #[test]
    fn test_state_change_keeps_country() {
        let table = table();
        let mut selection = lagos_selection(&table);
        selection.select(&table, LocationLevel::State, "Oyo").unwrap();
        assert_eq!(selection.get(LocationLevel::Country), DEFAULT_COUNTRY);
        assert_eq!(selection.get(LocationLevel::Lga), "");
        assert_eq!(selection.get(LocationLevel::Town), "");
        assert_eq!(
            selection.options(&table, LocationLevel::Lga),
            table.lgas("Oyo")
        );
    }

    #[test]
    fn test_unknown_option_rejected_without_mutation() {
        let table = table();
        let mut selection = lagos_selection(&table);
        let before = selection.clone();
        let err = selection
            .select(&table, LocationLevel::Lga, "Kumasi Metropolitan")
            .unwrap_err();
        assert!(matches!(err, LocationError::UnknownOption { .. }));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_disabled_level_rejected() {
        let table = table();
        let mut selection = LocationSelection::new();
        let err = selection.select(&table, LocationLevel::State, "Lagos").unwrap_err();
        assert_eq!(err, LocationError::ParentNotSelected("Country"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.json");
        std::fs::write(
            &path,
            r#"{"countries":["Kenya"],"statesByCountry":{"Kenya":["Nairobi"]},"townsByLGA":{}}"#,
        )
        .unwrap();

        let table = LocationTable::load(Some(&path)).unwrap();
        assert_eq!(table.countries, vec!["Kenya".to_string()]);
        assert_eq!(table.states("Kenya"), ["Nairobi".to_string()]);
        assert!(table.lgas("Nairobi").is_empty());
    }
}
