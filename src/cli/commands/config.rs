//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration (file plus environment, key masked)
    Show,

    /// Set a value in the config file
    Set {
        /// Config key (e.g., "api.endpoint", "ui.locale")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub fn run(command: ConfigCommands, config: &Config, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(config, format),
        ConfigCommands::Set { key, value } => set(&key, &value, quiet),
        ConfigCommands::Path => path(format),
    }
}

fn show(config: &Config, format: OutputFormat) -> Result<()> {
    let config = config.redacted();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    // Edit the file contents only, so environment overrides are not persisted
    let path = Config::config_path()?;
    let mut config = Config::load_from(&path)?;

    set_config_value(&mut config, key, value)?;
    config.save_to(&path)?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());

    match parts.as_slice() {
        ["api", "endpoint"] => config.api.endpoint = optional(value),
        ["api", "api_key"] => config.api.api_key = optional(value),
        ["ui", "dark_theme"] => config.ui.dark_theme = value.parse()?,
        ["ui", "locale"] => config.ui.locale = value.parse()?,
        ["offline", "delay_ms"] => config.offline.delay_ms = value.parse()?,
        _ => anyhow::bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn test_set_known_keys() {
        let mut config = Config::default();
        set_config_value(&mut config, "api.endpoint", "https://svc.test/complete").unwrap();
        set_config_value(&mut config, "ui.locale", "es").unwrap();
        set_config_value(&mut config, "ui.dark_theme", "false").unwrap();
        set_config_value(&mut config, "offline.delay_ms", "250").unwrap();

        assert_eq!(config.api.endpoint.as_deref(), Some("https://svc.test/complete"));
        assert_eq!(config.ui.locale, Locale::Es);
        assert!(!config.ui.dark_theme);
        assert_eq!(config.offline.delay_ms, 250);
    }

    #[test]
    fn test_empty_value_clears_optional_key() {
        let mut config = Config::default();
        config.api.api_key = Some("k".to_string());
        set_config_value(&mut config, "api.api_key", "").unwrap();
        assert!(config.api.api_key.is_none());
    }

    #[test]
    fn test_invalid_values_and_keys() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "ui.dark_theme", "maybe").is_err());
        assert!(set_config_value(&mut config, "offline.delay_ms", "-1").is_err());
        assert!(set_config_value(&mut config, "ui.theme", "dark").is_err());
    }
}
