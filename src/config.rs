//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Civic-information backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Origin serving `/data`, `/candidate` and `/pollingLocation`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Unset means wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Words of article content shown when the backend sent no abbreviation
    #[serde(default = "default_excerpt_words")]
    pub excerpt_words: usize,

    /// Page that candidate rows link to
    #[serde(default = "default_candidate_page")]
    pub candidate_page: String,

    /// Script that turns timeline anchors into the Twitter widget
    #[serde(default = "default_twitter_widget_script")]
    pub twitter_widget_script: String,
}

fn default_excerpt_words() -> usize {
    100
}

fn default_candidate_page() -> String {
    "candidate.html".to_string()
}

fn default_twitter_widget_script() -> String {
    "https://platform.twitter.com/widgets.js".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            excerpt_words: default_excerpt_words(),
            candidate_page: default_candidate_page(),
            twitter_widget_script: default_twitter_widget_script(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("voter-central").join("config.toml")),
            Some(PathBuf::from("/etc/voter-central/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Backend overrides
        if let Some(url) = var("VOTER_CENTRAL_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Some(timeout) = var("VOTER_CENTRAL_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.backend.request_timeout_secs = Some(secs);
            }
        }

        // Logging overrides
        if let Some(level) = var("VOTER_CENTRAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("VOTER_CENTRAL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Voter Central Configuration
#
# Environment variables override these settings:
# - VOTER_CENTRAL_BACKEND_URL
# - VOTER_CENTRAL_REQUEST_TIMEOUT_SECS
# - VOTER_CENTRAL_LOG_LEVEL
# - VOTER_CENTRAL_LOG_FORMAT

[backend]
# Origin serving /data, /candidate and /pollingLocation
base_url = "http://localhost:8080"

# Request timeout in seconds (unset: no timeout)
# request_timeout_secs = 30

[render]
# Words of article content shown when no abbreviation is provided
excerpt_words = 100

# Page linked from each candidate row
candidate_page = "candidate.html"

# Twitter widget script loaded on the candidate page
twitter_widget_script = "https://platform.twitter.com/widgets.js"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
