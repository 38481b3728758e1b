//! Application configuration for Confab.
//!
//! `AppConfig` represents the TOML config file passed via `--config`.
//! All fields have defaults, so an empty file (or no file at all) yields
//! a working local setup with the external generator disabled.

use serde::{Deserialize, Serialize};

use crate::intent::IntentCatalog;

/// Top-level configuration for the Confab backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listen address for the HTTP server.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port for the HTTP server.
    #[serde(default = "default_port")]
    pub port: u16,

    /// External generation capability settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Intent catalog override; the built-in catalog is used when absent.
    #[serde(default)]
    pub intents: Option<IntentCatalog>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            generator: GeneratorConfig::default(),
            intents: None,
        }
    }
}

/// Settings for the optional external language-model generator.
///
/// The capability is decided once at startup: it is enabled only when
/// `enabled` is true and the API key environment variable is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of an OpenAI-compatible chat completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds; a timeout counts as generation failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "CONFAB_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_from_empty_toml() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert!(!config.generator.enabled);
        assert_eq!(config.generator.timeout_secs, 30);
        assert!(config.intents.is_none());
    }

    #[test]
    fn test_config_deserialize_with_values() {
        let toml_str = r#"
host = "0.0.0.0"
port = 9000

[generator]
enabled = true
base_url = "http://localhost:11434/v1"
model = "llama3"
timeout_secs = 10
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert!(config.generator.enabled);
        assert_eq!(config.generator.model, "llama3");
        assert_eq!(config.generator.timeout_secs, 10);
        // Unset fields keep their defaults.
        assert_eq!(config.generator.api_key_env, "CONFAB_API_KEY");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.generator.base_url, config.generator.base_url);
    }
}
