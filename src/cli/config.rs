// ABOUTME: CLI config command - print the effective configuration after merging config files

use super::OutputFormat;
use crate::config::AppConfig;
use anyhow::Result;

/// Execute the config command
pub fn execute(format: OutputFormat) -> Result<()> {
    let config = AppConfig::load()?;
    println!("{}", render(&config, format)?);
    Ok(())
}

/// Serialize the configuration in the requested format
pub fn render(config: &AppConfig, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
        OutputFormat::Text => toml::to_string_pretty(config)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output_is_loadable_toml() {
        let config = AppConfig::default();
        let text = render(&config, OutputFormat::Text).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_output_has_sections() {
        let json = render(&AppConfig::default(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ui"]["tick_rate_ms"], 250);
        assert_eq!(value["carousel"]["auto_advance_ms"], 3000);
    }
}
