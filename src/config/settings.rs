//! Settings structures for prefix-complete configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub index: IndexSettings,
    pub autocomplete: AutocompleteSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (PREFIX_COMPLETE_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PREFIX_COMPLETE_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("PREFIX_COMPLETE_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("PREFIX_COMPLETE_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("PREFIX_COMPLETE_BACKEND") {
            self.autocomplete.backend = val;
        }
        if let Ok(val) = std::env::var("PREFIX_COMPLETE_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse() {
                self.autocomplete.debounce_ms = ms;
            }
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name displayed in UI
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Prefix Complete".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Suggestion requests allowed per second across all clients
    pub requests_per_second: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
            requests_per_second: 20,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// User agent string sent to lookup backends
    pub useragent: String,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 3.0,
            useragent: format!("prefix-complete/{}", env!("CARGO_PKG_VERSION")),
            pool_maxsize: 10,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Prefix index settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Vocabulary inserted at startup
    pub seed_words: Vec<String>,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            seed_words: ["apple", "application", "banana", "band", "cat", "dog"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Autocomplete behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteSettings {
    /// External lookup backend (wikipedia, duckduckgo, brave)
    pub backend: String,
    /// Override for the backend endpoint
    pub base_url: Option<String>,
    /// Language code passed to backends that support it
    pub language: String,
    /// Maximum candidates requested from the backend
    pub limit: u32,
    /// Quiet period before a typed query is submitted (milliseconds)
    pub debounce_ms: u64,
    /// Number of accepted queries kept for the empty-query list
    pub history_size: usize,
}

impl Default for AutocompleteSettings {
    fn default() -> Self {
        Self {
            backend: "wikipedia".to_string(),
            base_url: None,
            language: "en".to_string(),
            limit: 10,
            debounce_ms: 300,
            history_size: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8888);
        assert!(!settings.general.debug);
        assert_eq!(settings.autocomplete.backend, "wikipedia");
        assert_eq!(settings.autocomplete.debounce_ms, 300);
        assert_eq!(settings.autocomplete.history_size, 5);
        assert_eq!(settings.index.seed_words.len(), 6);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
server:
  port: 9000
autocomplete:
  backend: ddg
  limit: 5
index:
  seed_words: [rust, ruby]
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.bind_address, "127.0.0.1");
        assert_eq!(settings.autocomplete.backend, "ddg");
        assert_eq!(settings.autocomplete.limit, 5);
        assert_eq!(settings.autocomplete.debounce_ms, 300);
        assert_eq!(settings.index.seed_words, vec!["rust", "ruby"]);
    }
}
