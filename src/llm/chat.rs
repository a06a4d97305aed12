// src/llm/chat.rs
// OpenAI-compatible chat completions gateway (single user message, non-streaming)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::http_client::LlmHttpClient;
use super::provider::{Backend, LlmGateway};
use crate::config::GatewayConfig;
use crate::error::GatewayError;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Gateway for `/v1/chat/completions` style endpoints
pub struct ChatGateway {
    endpoint: String,
    api_key: Option<String>,
    http: LlmHttpClient,
}

impl ChatGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            http: LlmHttpClient::new(config.timeout()),
        }
    }
}

/// Extract the first choice's message content from a chat envelope
fn unwrap_envelope(body: &str) -> Result<String, GatewayError> {
    let data: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::MalformedEnvelope(format!("failed to parse chat response: {}", e)))?;
    data.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| GatewayError::MalformedEnvelope("no message content in first choice".into()))
}

#[async_trait]
impl LlmGateway for ChatGateway {
    #[instrument(skip_all, fields(backend = "chat", model = %model, prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            stream: false,
        };

        let body = self
            .http
            .post_json(&self.endpoint, self.api_key.as_deref(), &request)
            .await?;
        unwrap_envelope(&body)
    }

    fn backend(&self) -> Backend {
        Backend::Chat
    }
}
