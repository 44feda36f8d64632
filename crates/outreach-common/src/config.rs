//! Configuration for Outreach

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Web UI configuration
    #[serde(default)]
    pub web: WebConfig,

    /// Mock store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Hostname
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            bind_address: default_bind_address(),
        }
    }
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API port
    #[serde(default = "default_api_port")]
    pub port: u16,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_api_port() -> u16 {
    8080
}

/// Web UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Enable Web UI
    #[serde(default = "default_web_enabled")]
    pub enabled: bool,

    /// Web UI server bind address
    #[serde(default = "default_web_bind")]
    pub bind: String,

    /// API base URL for frontend
    #[serde(default = "default_web_api_url")]
    pub api_url: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: default_web_enabled(),
            bind: default_web_bind(),
            api_url: default_web_api_url(),
        }
    }
}

fn default_web_enabled() -> bool {
    true
}

fn default_web_bind() -> String {
    "0.0.0.0:8081".to_string()
}

fn default_web_api_url() -> String {
    "/api/v1".to_string()
}

/// Mock store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Minimum simulated latency per operation in milliseconds
    #[serde(default = "default_latency_min_ms")]
    pub latency_min_ms: u64,

    /// Maximum simulated latency per operation in milliseconds
    #[serde(default = "default_latency_max_ms")]
    pub latency_max_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency_min_ms: default_latency_min_ms(),
            latency_max_ms: default_latency_max_ms(),
        }
    }
}

fn default_latency_min_ms() -> u64 {
    200
}

fn default_latency_max_ms() -> u64 {
    500
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "json" or "text"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Load configuration from the default locations, falling back to defaults.
    ///
    /// The store has no external resources, so a missing file is not an error.
    pub fn load() -> crate::Result<Self> {
        let paths = [
            std::path::PathBuf::from("./config.toml"),
            std::path::PathBuf::from("/etc/outreach/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.hostname, "localhost");
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.store.latency_min_ms, 200);
        assert_eq!(config.store.latency_max_ms, 500);
        assert!(config.web.enabled);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
hostname = "outreach.example.com"

[api]
port = 9090

[store]
latency_min_ms = 0
latency_max_ms = 0

[web]
enabled = false
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.hostname, "outreach.example.com");
        assert_eq!(config.api.port, 9090);
        assert_eq!(config.store.latency_max_ms, 0);
        assert!(!config.web.enabled);
    }
}
