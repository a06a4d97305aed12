// src/llm/ollama.rs
// Ollama /api/generate gateway (non-streaming)

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::http_client::LlmHttpClient;
use super::provider::{Backend, LlmGateway};
use crate::config::GatewayConfig;
use crate::error::GatewayError;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    stream: bool,
}

/// Gateway for Ollama-style generate endpoints
pub struct OllamaGateway {
    endpoint: String,
    http: LlmHttpClient,
}

impl OllamaGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            http: LlmHttpClient::new(config.timeout()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pull the `response` text out of a generate envelope
fn unwrap_envelope(body: &str) -> Result<String, GatewayError> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| GatewayError::MalformedEnvelope(format!("body is not JSON: {}", e)))?;
    match envelope.get("response") {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(GatewayError::MalformedEnvelope(
            "'response' is not a string".into(),
        )),
        None => Err(GatewayError::MalformedEnvelope(
            "missing 'response' field".into(),
        )),
    }
}

#[async_trait]
impl LlmGateway for OllamaGateway {
    #[instrument(skip_all, fields(backend = "generate", model = %model, prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        let request = GenerateRequest {
            model,
            prompt,
            temperature,
            stream: false,
        };

        let body = self.http.post_json(&self.endpoint, None, &request).await?;
        unwrap_envelope(&body)
    }

    fn backend(&self) -> Backend {
        Backend::Generate
    }
}
