// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

/// Default auto-dismiss timeout for non-persistent banners
fn default_timeout_ms() -> u64 {
    7000
}

fn default_container_id() -> String {
    "flash-container".to_string()
}

/// Older templates used this id for the same container
fn default_legacy_container_ids() -> Vec<String> {
    vec!["js-flash-container".to_string()]
}

fn default_fallback_selector() -> String {
    "main.container".to_string()
}

/// Flash banner configuration section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FlashConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Canonical id of the element banners are inserted into
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// Deprecated aliases still honored for the default container
    #[serde(default = "default_legacy_container_ids")]
    pub legacy_container_ids: Vec<String>,
    /// Used when no container with a matching id exists
    #[serde(default = "default_fallback_selector")]
    pub fallback_selector: String,
}

impl FlashConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FlashConfig {
    fn default() -> Self {
        FlashConfig {
            timeout_ms: default_timeout_ms(),
            container_id: default_container_id(),
            legacy_container_ids: default_legacy_container_ids(),
            fallback_selector: default_fallback_selector(),
        }
    }
}

/// Fetch wrapper configuration section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetchConfig {
    /// `name` of the `<meta>` tag carrying the CSRF token
    pub csrf_meta_name: String,
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            csrf_meta_name: "csrf-token".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub flash: FlashConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}
