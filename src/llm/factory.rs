// src/llm/factory.rs
// Build the configured gateway backend

use std::sync::Arc;
use tracing::info;

use super::chat::ChatGateway;
use super::ollama::OllamaGateway;
use super::provider::{Backend, LlmGateway};
use crate::config::GatewayConfig;

/// Create the gateway selected by `config.backend`
pub fn create_gateway(config: &GatewayConfig) -> Arc<dyn LlmGateway> {
    info!(
        backend = %config.backend,
        endpoint = %config.endpoint,
        model = %config.model,
        timeout_secs = config.timeout_secs,
        "LLM gateway configured"
    );
    match config.backend {
        Backend::Generate => Arc::new(OllamaGateway::new(config)),
        Backend::Chat => Arc::new(ChatGateway::new(config)),
    }
}
