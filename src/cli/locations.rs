// ABOUTME: CLI locations command - browse the country/state/LGA/town reference table
//
// The most specific filter wins: --lga lists towns, --state lists LGAs,
// --country lists states, no filter lists countries.

use super::{LocationsArgs, OutputFormat};
use crate::config::AppConfig;
use crate::forms::LocationTable;
use anyhow::Result;
use serde::Serialize;

/// One level of the table with the parent it was looked up under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationListing {
    pub level: &'static str,
    pub parent: Option<String>,
    pub entries: Vec<String>,
}

/// Execute the locations command
pub fn execute(args: &LocationsArgs, format: OutputFormat) -> Result<()> {
    let config = AppConfig::load()?;
    let table = LocationTable::load(config.locations.data_file.as_deref())?;
    let listing = list(&table, args);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
        OutputFormat::Text => output_text(&listing),
    }
    Ok(())
}

/// Resolve the listing for the given filters
pub fn list(table: &LocationTable, args: &LocationsArgs) -> LocationListing {
    let (level, parent, entries) = if let Some(lga) = &args.lga {
        ("towns", Some(lga.clone()), table.towns(lga))
    } else if let Some(state) = &args.state {
        ("lgas", Some(state.clone()), table.lgas(state))
    } else if let Some(country) = &args.country {
        ("states", Some(country.clone()), table.states(country))
    } else {
        ("countries", None, table.countries.as_slice())
    };
    LocationListing {
        level,
        parent,
        entries: entries.to_vec(),
    }
}

fn output_text(listing: &LocationListing) {
    let heading = match &listing.parent {
        Some(parent) => format!("{} of {}", listing.level, parent),
        None => listing.level.to_string(),
    };
    if listing.entries.is_empty() {
        println!("No {heading} found.");
        return;
    }
    println!("{} ({})", heading.to_uppercase(), listing.entries.len());
    println!("{}", "-".repeat(40));
    for entry in &listing.entries {
        println!("{entry}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LocationTable {
        LocationTable::embedded().unwrap()
    }

    #[test]
    fn test_no_filter_lists_countries() {
        let listing = list(&table(), &LocationsArgs::default());
        assert_eq!(listing.level, "countries");
        assert!(listing.entries.contains(&"Nigeria".to_string()));
    }

    #[test]
    fn test_most_specific_filter_wins() {
        let args = LocationsArgs {
            country: Some("Nigeria".to_string()),
            state: Some("Lagos".to_string()),
            lga: None,
        };
        let listing = list(&table(), &args);
        assert_eq!(listing.level, "lgas");
        assert_eq!(listing.parent.as_deref(), Some("Lagos"));
        assert_eq!(listing.entries, table().lgas("Lagos").to_vec());
    }

    #[test]
    fn test_unknown_parent_is_empty() {
        let args = LocationsArgs {
            lga: Some("Atlantis".to_string()),
            ..LocationsArgs::default()
        };
        assert!(list(&table(), &args).entries.is_empty());
    }
}
