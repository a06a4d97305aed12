// src/intent/extractor.rs
// Bounded-retry extraction of a validated value from model output

use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::command::DeviceCommand;
use super::schema::{Classification, OutputSchema, compose_prompt};
use crate::config::AppConfig;
use crate::error::{AttemptError, ClassifyError, GatewayError};
use crate::llm::LlmGateway;
use crate::llm::logging::{log_attempt_failure, log_generation};

/// Default number of attempts per extraction
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default deadline for a single gateway call
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(60);

/// Classifies requests into an `IntentCategory`
pub type Classifier = Extractor<Classification>;

/// Extracts an open-ended `DeviceCommand`
pub type CommandExtractor = Extractor<DeviceCommand>;

/// Runs prompt -> gateway -> decode -> validate, retrying every failure
/// kind uniformly until `max_attempts` is exhausted.
///
/// Holds no mutable state, so one instance can serve concurrent calls.
pub struct Extractor<S> {
    gateway: Arc<dyn LlmGateway>,
    model: String,
    temperature: f32,
    max_attempts: u32,
    attempt_timeout: Duration,
    _schema: PhantomData<fn() -> S>,
}

impl<S: OutputSchema> Extractor<S> {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
            temperature: 0.0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            _schema: PhantomData,
        }
    }

    /// Set the attempt bound (at least one attempt is always made)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    /// The exact prompt sent on every attempt for this input
    pub fn prompt_for(&self, user_input: &str) -> String {
        compose_prompt(&S::instructions(), user_input)
    }

    /// Extract a validated value, or fail after `max_attempts` attempts
    pub async fn extract(&self, user_input: &str) -> Result<S, ClassifyError> {
        self.extract_with_cancel(user_input, &CancellationToken::new())
            .await
    }

    /// Same as `extract`, checking `cancel` before each attempt and
    /// abandoning an in-flight attempt once it fires.
    pub async fn extract_with_cancel(
        &self,
        user_input: &str,
        cancel: &CancellationToken,
    ) -> Result<S, ClassifyError> {
        if user_input.trim().is_empty() {
            return Err(ClassifyError::EmptyInput);
        }

        let prompt = self.prompt_for(user_input);
        let request_id = Uuid::new_v4().to_string();
        let mut attempts = 0;

        loop {
            if cancel.is_cancelled() {
                info!(request_id = %request_id, attempts, "Extraction cancelled");
                return Err(ClassifyError::Cancelled);
            }
            attempts += 1;

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(request_id = %request_id, attempts, "Extraction cancelled mid-attempt");
                    return Err(ClassifyError::Cancelled);
                }
                outcome = self.attempt(&request_id, &prompt) => outcome,
            };

            match outcome {
                Ok(value) => {
                    debug!(request_id = %request_id, attempts, model = %self.model, "Extraction succeeded");
                    return Ok(value);
                }
                Err(e) => {
                    log_attempt_failure(&request_id, attempts, self.max_attempts, &e);
                    if attempts >= self.max_attempts {
                        warn!(request_id = %request_id, attempts, "All extraction attempts exhausted");
                        return Err(ClassifyError::ClassificationFailed {
                            attempts,
                            last_error: e,
                        });
                    }
                }
            }
        }
    }

    async fn attempt(&self, request_id: &str, prompt: &str) -> Result<S, AttemptError> {
        let start = Instant::now();
        let call = self.gateway.generate(prompt, &self.model, self.temperature);
        let raw = tokio::time::timeout(self.attempt_timeout, call)
            .await
            .map_err(|_| GatewayError::Timeout(self.attempt_timeout))??;
        log_generation(
            request_id,
            self.gateway.backend(),
            &self.model,
            start.elapsed().as_millis() as u64,
            raw.len(),
        );

        let value: Value = serde_json::from_str(raw.trim())?;
        Ok(S::from_value(value)?)
    }
}

impl Extractor<Classification> {
    /// Build a classifier from configuration. Temperature stays at 0.0.
    pub fn from_config(gateway: Arc<dyn LlmGateway>, config: &AppConfig) -> Self {
        Self::new(gateway, config.classifier_model())
            .with_max_attempts(config.classifier.max_attempts)
            .with_attempt_timeout(config.classifier_attempt_timeout())
    }

    /// Classify a request into one of the fixed intent categories
    pub async fn classify(&self, user_input: &str) -> Result<Classification, ClassifyError> {
        self.extract(user_input).await
    }

    pub async fn classify_with_cancel(
        &self,
        user_input: &str,
        cancel: &CancellationToken,
    ) -> Result<Classification, ClassifyError> {
        self.extract_with_cancel(user_input, cancel).await
    }
}

impl Extractor<DeviceCommand> {
    /// Build a command extractor from configuration (single attempt by default)
    pub fn from_config(gateway: Arc<dyn LlmGateway>, config: &AppConfig) -> Self {
        Self::new(gateway, config.command_model())
            .with_max_attempts(config.command.max_attempts)
            .with_temperature(config.command.temperature)
            .with_attempt_timeout(config.llm.timeout())
    }
}
