// Configuration module for flashkit
// This module handles loading and parsing configuration from ~/.config/flashkit/config.toml

mod types;

pub use types::{Config, FetchConfig, FlashConfig};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

impl ConfigResult {
    fn defaults(warning: Option<String>) -> Self {
        Self {
            config: Config::default(),
            warning,
        }
    }
}

/// Loads configuration from ~/.config/flashkit/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&get_config_path())
}

/// Loads configuration from an explicit path, with the same fallbacks as
/// [`load_config`]
pub fn load_config_from(config_path: &Path) -> ConfigResult {
    #[cfg(debug_assertions)]
    log::debug!("Loading config from {:?}", config_path);

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            #[cfg(debug_assertions)]
            log::debug!("No config file, using defaults");
            return ConfigResult::defaults(None);
        }
        Err(e) => {
            log::error!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult::defaults(Some(format!("Failed to read config: {}", e)));
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            #[cfg(debug_assertions)]
            log::debug!(
                "Config parsed: timeout {}ms, container #{}",
                config.flash.timeout_ms,
                config.flash.container_id
            );
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            log::error!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult::defaults(Some(format!("Invalid config: {}", e)))
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/flashkit/config.toml on all platforms for consistency.
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("flashkit")
        .join("config.toml")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
