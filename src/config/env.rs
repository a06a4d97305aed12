// src/config/env.rs
// Environment overrides and configuration validation

use tracing::{debug, info, warn};

use super::file::{AppConfig, HomeAssistantConfig};
use crate::error::{HassIntentError, Result};
use crate::http::is_local_url;
use crate::llm::Backend;

/// Read a process environment variable, filtering empty values.
/// Only the binary passes this to `apply_env_overrides`.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Apply environment overrides on top of file configuration.
///
/// `lookup` resolves a variable name; the core never reads process state itself.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup("HASS_INTENT_LLM_ENDPOINT") {
        debug!(endpoint = %endpoint, "LLM endpoint overridden from environment");
        config.llm.endpoint = endpoint;
    }
    if let Some(model) = lookup("HASS_INTENT_LLM_MODEL") {
        config.llm.model = model;
    }
    if let Some(backend) = lookup("HASS_INTENT_LLM_BACKEND") {
        match Backend::from_str(&backend) {
            Some(b) => config.llm.backend = b,
            None => info!(value = %backend, "Unknown HASS_INTENT_LLM_BACKEND, keeping configured backend"),
        }
    }
    if let Some(key) = lookup("HASS_INTENT_LLM_API_KEY") {
        config.llm.api_key = Some(key);
    }

    let base_url = lookup("HOME_ASSISTANT_BASE_URL");
    let token = lookup("HOME_ASSISTANT_TOKEN");
    if let Some(ha) = config.home_assistant.as_mut() {
        if let Some(url) = base_url {
            ha.base_url = url;
        }
        if let Some(token) = token {
            ha.token = token;
        }
    } else if let (Some(base_url), Some(token)) = (base_url, token) {
        config.home_assistant = Some(HomeAssistantConfig { base_url, token });
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

impl AppConfig {
    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if self.llm.endpoint.trim().is_empty() {
            validation.add_error("llm.endpoint is empty");
        } else if url::Url::parse(&self.llm.endpoint).is_err() {
            validation.add_error(format!("llm.endpoint '{}' is not a valid URL", self.llm.endpoint));
        } else if !is_local_url(&self.llm.endpoint) {
            validation.add_warning(format!(
                "llm.endpoint '{}' is not a local address; prompts include raw user text",
                self.llm.endpoint
            ));
        }

        if self.llm.model.trim().is_empty() {
            validation.add_error("llm.model is empty");
        }
        if self.llm.timeout_secs == 0 {
            validation.add_error("llm.timeout_secs must be greater than zero");
        }
        if self.classifier.attempt_timeout_secs == Some(0) {
            validation.add_error("classifier.attempt_timeout_secs must be greater than zero");
        }
        if self.classifier.max_attempts == 0 {
            validation.add_error("classifier.max_attempts must be at least 1");
        }
        if self.command.max_attempts == 0 {
            validation.add_error("command.max_attempts must be at least 1");
        }
        if self.llm.backend == Backend::Chat && self.llm.api_key.is_none() && !is_local_url(&self.llm.endpoint) {
            validation.add_warning("chat backend configured without an API key");
        }

        match &self.home_assistant {
            None => validation.add_warning(
                "No Home Assistant configured. Set HOME_ASSISTANT_BASE_URL and HOME_ASSISTANT_TOKEN.",
            ),
            Some(ha) if ha.token.trim().is_empty() => {
                validation.add_error("home_assistant.token is empty");
            }
            Some(_) => {}
        }

        validation
    }

    /// Validate before serving requests: log each warning and refuse
    /// a configuration that has errors.
    pub fn ensure_valid(&self) -> Result<ConfigValidation> {
        let validation = self.validate();
        for warning in &validation.warnings {
            warn!("Config: {}", warning);
        }
        if !validation.is_valid() {
            return Err(HassIntentError::Config(validation.report()));
        }
        Ok(validation)
    }
}
