use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::locale::Locale;

/// Environment variable overriding `api.endpoint`
pub const ENV_API_URL: &str = "REMIXER_API_URL";
/// Environment variable overriding `api.api_key`
pub const ENV_API_KEY: &str = "REMIXER_API_KEY";
/// Environment variable overriding `ui.locale`
pub const ENV_LOCALE: &str = "REMIXER_LOCALE";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub offline: OfflineConfig,
}

/// Text-generation service settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Endpoint receiving generation requests; unset means offline mode
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bearer credential sent with each request
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Appearance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Enable dark theme
    #[serde(default = "default_true")]
    pub dark_theme: bool,
    /// UI language
    #[serde(default)]
    pub locale: Locale,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_theme: true,
            locale: Locale::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Offline (simulated) generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineConfig {
    /// Simulated processing delay in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_delay_ms() -> u64 {
    1000
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "remixer", "Remixer")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        Self::load_with(&Self::config_path()?, |key| std::env::var(key).ok())
    }

    /// Load a file and apply overrides from `lookup`. Fails on a bad file or
    /// a bad override rather than dropping either.
    pub fn load_with<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides(lookup)?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Override file settings with values from the environment.
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            tracing::debug!("{} overrides api.endpoint", ENV_API_URL);
            self.api.endpoint = Some(url);
        }
        if let Some(key) = get(ENV_API_KEY) {
            tracing::debug!("{} overrides api.api_key", ENV_API_KEY);
            self.api.api_key = Some(key);
        }
        if let Some(locale) = get(ENV_LOCALE) {
            self.ui.locale = locale.parse()?;
        }
        Ok(())
    }

    /// Copy suitable for display, with the credential masked
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.api.api_key.is_some() {
            config.api.api_key = Some("********".to_string());
        }
        config
    }
}
