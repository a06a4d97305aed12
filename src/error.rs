// src/error.rs
// Error taxonomy for the classification pipeline and the surfaces around it

use std::time::Duration;
use thiserror::Error;

/// Failure of a single Gateway call. Never carries parsed model content.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

/// Model output parsed as JSON but does not have the required shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaViolation {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown request_type '{0}'")]
    UnknownCategory(String),

    #[error("unexpected field '{0}'")]
    UnexpectedField(String),

    #[error("{0}")]
    Invalid(String),
}

/// Why one extraction attempt did not produce a usable value.
/// All variants are retryable and stay inside the extraction loop.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("model output is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("schema violation: {0}")]
    Schema(#[from] SchemaViolation),
}

/// The only errors that cross the classifier boundary.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("request text is empty")]
    EmptyInput,

    #[error("classification failed after {attempts} attempt(s): {last_error}")]
    ClassificationFailed {
        attempts: u32,
        last_error: AttemptError,
    },

    #[error("classification cancelled")]
    Cancelled,
}

/// Crate-level error for config, device backend, web and CLI surfaces
#[derive(Error, Debug)]
pub enum HassIntentError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("device backend error: {0}")]
    Device(String),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Convenience type alias for Result using HassIntentError
pub type Result<T> = std::result::Result<T, HassIntentError>;

impl HassIntentError {
    /// Message safe to hand back over the web surface
    pub fn to_user_string(&self) -> String {
        self.to_string()
    }
}
