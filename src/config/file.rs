// src/config/file.rs
// File-based configuration from ~/.hass-intent/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{HassIntentError, Result};
use crate::llm::Backend;

/// Default Ollama generate endpoint
pub const DEFAULT_LLM_ENDPOINT: &str = "http://localhost:11434/api/generate";
/// Default classification model
pub const DEFAULT_LLM_MODEL: &str = "mistral";
/// Default per-attempt deadline for one LLM call
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
/// Default number of classification attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Top-level config structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: GatewayConfig,
    pub classifier: ClassifierConfig,
    pub command: CommandConfig,
    pub home_assistant: Option<HomeAssistantConfig>,
    pub server: ServerConfig,
}

/// Text-generation backend settings handed to the gateway constructor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Which envelope the endpoint speaks
    pub backend: Backend,
    /// Full URL the prompt is POSTed to
    pub endpoint: String,
    /// Model identifier sent with each request
    pub model: String,
    /// Per-attempt deadline in seconds
    pub timeout_secs: u64,
    /// Bearer token for hosted chat backends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Generate,
            endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Intent classification loop settings. Temperature is always 0.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub max_attempts: u32,
    /// Overrides `llm.model` for classification
    pub model: Option<String>,
    /// Per-attempt deadline in seconds; falls back to `llm.timeout_secs`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_timeout_secs: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            model: None,
            attempt_timeout_secs: None,
        }
    }
}

/// Structured command extraction settings (single attempt unless raised)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    pub max_attempts: u32,
    pub temperature: f32,
    pub model: Option<String>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            temperature: 0.0,
            model: None,
        }
    }
}

/// Home Assistant REST API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeAssistantConfig {
    pub base_url: String,
    pub token: String,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl AppConfig {
    /// Load config from an explicit path, or from ~/.hass-intent/config.toml.
    ///
    /// An explicit path must exist and parse. The default path falls back to
    /// built-in defaults when missing or unreadable.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                HassIntentError::Config(format!("cannot read {}: {}", path.display(), e))
            })?;
            let config = Self::from_toml_str(&contents)?;
            debug!(path = %path.display(), "Loaded config from file");
            return Ok(config);
        }

        let path = Self::default_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    Ok(config)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Ok(Self::default())
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hass-intent")
            .join("config.toml")
    }

    /// Model used for classification
    pub fn classifier_model(&self) -> &str {
        self.classifier.model.as_deref().unwrap_or(&self.llm.model)
    }

    /// Deadline for one classification attempt
    pub fn classifier_attempt_timeout(&self) -> Duration {
        self.classifier
            .attempt_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.llm.timeout())
    }

    /// Model used for command extraction
    pub fn command_model(&self) -> &str {
        self.command.model.as_deref().unwrap_or(&self.llm.model)
    }
}
