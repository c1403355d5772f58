use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::provider::ServiceId;

pub const DEFAULT_LANGUAGE: &str = "ru";
pub const DEFAULT_RADIUS: u32 = 1000;

/// Base URLs of the remote services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub graphhopper: String,
    pub openweather: String,
    pub opentripmap: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            graphhopper: "https://graphhopper.com".to_string(),
            openweather: "https://api.openweathermap.org".to_string(),
            opentripmap: "https://api.opentripmap.com".to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// language = "en"
/// default_radius = 2000
///
/// [keys]
/// graphhopper = "..."
/// openweather = "..."
/// opentripmap = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language used for place names and descriptions.
    pub language: String,

    /// Search radius in meters offered as the prompt default.
    pub default_radius: u32,

    /// API keys keyed by service id.
    pub keys: HashMap<String, String>,

    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            default_radius: DEFAULT_RADIUS,
            keys: HashMap::new(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Load config from disk (or defaults on first run), then apply
    /// environment overrides for API keys.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_stored()?;
        cfg.apply_env(|name| env::var(name).ok());
        Ok(cfg)
    }

    /// Load only what is stored on disk, ignoring the environment.
    pub fn load_stored() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Environment variable that overrides the stored key of a service.
    pub fn env_var(service: ServiceId) -> &'static str {
        match service {
            ServiceId::GraphHopper => "GRAPHHOPPER_API_KEY",
            ServiceId::OpenWeather => "OPEN_WEATHER_API_KEY",
            ServiceId::OpenTripMap => "OPEN_TRIP_MAP_API_KEY",
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for &service in ServiceId::all() {
            if let Some(key) = lookup(Self::env_var(service)).filter(|k| !k.trim().is_empty()) {
                self.keys.insert(service.as_str().to_string(), key);
            }
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "travel-info", "travel-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn upsert_api_key(&mut self, service: ServiceId, api_key: String) {
        self.keys.insert(service.as_str().to_string(), api_key);
    }

    pub fn api_key(&self, service: ServiceId) -> Option<&str> {
        self.keys.get(service.as_str()).map(String::as_str)
    }

    /// Like [`Config::api_key`], but with an actionable error when missing.
    pub fn require_key(&self, service: ServiceId) -> Result<&str> {
        self.api_key(service).ok_or_else(|| {
            anyhow!(
                "No API key configured for service '{service}'.\n\
                 Hint: run `travel configure {service}` or set {}.",
                Self::env_var(service)
            )
        })
    }
}
