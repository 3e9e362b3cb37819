//! Configuration system for CreditScore.
//!
//! Load service configuration from TOML or YAML files to control the listen
//! address, the model file and the metrics chart without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use creditscore_config::ServiceConfig;
//!
//! let config = ServiceConfig::from_toml_str(r#"
//!     [server]
//!     port = 9090
//!
//!     [model]
//!     path = "/srv/models/forest.json"
//! "#).unwrap();
//!
//! assert_eq!(config.bind_addr(), "0.0.0.0:9090");
//! assert_eq!(config.metrics.len(), 3);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use creditscore_config::ServiceConfig;
//!
//! let config = ServiceConfig::load("creditscore.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::{Path, PathBuf};

use creditscore_core::ModelMetric;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CREDITSCORE_CONFIG";

/// Configuration file used when neither argument nor environment names one.
pub const DEFAULT_CONFIG_PATH: &str = "creditscore.toml";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main service configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceConfig {
    /// HTTP listener configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Classifier model configuration.
    #[serde(default)]
    pub model: ModelConfig,

    /// Rows of the model performance chart.
    #[serde(default = "ModelMetric::defaults")]
    pub metrics: Vec<ModelMetric>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            metrics: ModelMetric::defaults(),
        }
    }
}

impl ServiceConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking the format by extension.
    ///
    /// `.yaml` and `.yml` files are read as YAML, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the listen port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    /// Sets the model file path.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model.path = path.into();
        self
    }

    /// Replaces the metrics chart rows.
    pub fn with_metrics(mut self, metrics: Vec<ModelMetric>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Checks values serde cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".to_string()));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".to_string()));
        }
        if self.model.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("model.path must not be empty".to_string()));
        }
        for metric in &self.metrics {
            if !(0.0..=100.0).contains(&metric.value) {
                return Err(ConfigError::Invalid(format!(
                    "metric {} must be a percentage, got {}",
                    metric.name, metric.value
                )));
            }
        }
        Ok(())
    }
}

/// Resolves the configuration file: explicit argument, then
/// [`CONFIG_ENV`], then [`DEFAULT_CONFIG_PATH`].
pub fn config_path(arg: Option<String>) -> PathBuf {
    arg.or_else(|| std::env::var(CONFIG_ENV).ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to allow cross-origin requests from any origin.
    #[serde(default = "default_cors")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: default_cors(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors() -> bool {
    true
}

/// Classifier model configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ModelConfig {
    /// JSON export of the fitted forest.
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model/credit_op_score_model.json")
}
