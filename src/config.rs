//! Application configuration
//!
//! Loaded from `<config_dir>/theme-sync/theme-sync.toml`. A missing file
//! means defaults; environment variables override whatever was loaded.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::app::PluginMode;
use crate::constants::{defaults, env as env_keys};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Server-side rendering pass before hydration
    #[serde(default)]
    pub ssr: bool,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default = "default_plugins")]
    pub plugins: Vec<PluginSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub public: PublicRuntimeConfig,
}

/// Values exposed to client code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicRuntimeConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    /// Write `dark` back when storage was empty or held garbage
    #[serde(default)]
    pub persist_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,
    #[serde(default)]
    pub mode: PluginMode,
}

impl PluginSpec {
    pub fn new(name: &str, mode: PluginMode) -> Self {
        Self {
            name: name.to_string(),
            mode,
        }
    }
}

fn default_log_level() -> String {
    defaults::LOG_LEVEL.to_string()
}

fn default_api_base() -> String {
    defaults::API_BASE.to_string()
}

fn default_plugins() -> Vec<PluginSpec> {
    vec![
        PluginSpec::new("leaflet", PluginMode::Client),
        PluginSpec::new("axios", PluginMode::Universal),
        PluginSpec::new("theme", PluginMode::Universal),
    ]
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Default for PublicRuntimeConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            ssr: false,
            runtime: RuntimeConfig::default(),
            theme: ThemeSettings::default(),
            plugins: default_plugins(),
        }
    }
}

impl AppConfig {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load from the default location, then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from a TOML file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from {:?}", path))?;
        config.validate();

        info!(path = %path.display(), plugins = config.plugins.len(), "Loaded config");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, contents).with_context(|| format!("Failed to write config to {:?}", path))?;
        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Where the theme store lives: config override or the platform default
    pub fn store_path(&self) -> PathBuf {
        self.theme
            .store_path
            .clone()
            .unwrap_or_else(crate::store::FileStore::default_path)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any key lookup (env vars in production)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_base) = lookup(env_keys::API_BASE) {
            self.runtime.public.api_base = api_base;
        }
        if let Some(ssr) = lookup(env_keys::SSR) {
            match ssr.parse() {
                Ok(ssr) => self.ssr = ssr,
                Err(_) => warn!(value = %ssr, var = env_keys::SSR, "Ignoring non-boolean override"),
            }
        }
        if let Some(store) = lookup(env_keys::STORE) {
            self.theme.store_path = Some(PathBuf::from(store));
        }
        self.validate();
    }

    /// Replace unusable values with defaults
    fn validate(&mut self) {
        if self.runtime.public.api_base.trim().is_empty() {
            warn!(using = defaults::API_BASE, "api_base is empty, using default");
            self.runtime.public.api_base = default_api_base();
        }

        let level = self.log_level.to_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            self.log_level = level;
        } else {
            warn!(log_level = %self.log_level, using = defaults::LOG_LEVEL, "Unknown log_level, using default");
            self.log_level = default_log_level();
        }

        let mut seen = Vec::new();
        self.plugins.retain(|plugin| {
            if seen.contains(&plugin.name) {
                warn!(plugin = %plugin.name, "Duplicate plugin entry dropped");
                false
            } else {
                seen.push(plugin.name.clone());
                true
            }
        });
    }
}
