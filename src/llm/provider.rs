// src/llm/provider.rs
// Gateway abstraction over a text-generation backend

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GatewayError;

/// Response envelope spoken by a backend endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Ollama-style `/api/generate`: `{model, prompt, temperature, stream}` -> `{response}`
    Generate,
    /// OpenAI-compatible `/v1/chat/completions`: `choices[0].message.content`
    Chat,
}

impl Backend {
    /// Parse backend from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "generate" | "ollama" => Some(Self::Generate),
            "chat" | "openai" => Some(Self::Chat),
            _ => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generate => write!(f, "generate"),
            Self::Chat => write!(f, "chat"),
        }
    }
}

/// One text-generation network call.
///
/// Implementations unwrap the transport envelope only; the returned text is
/// the model's raw output and is never JSON-parsed here. No retries at this layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, GatewayError>;

    /// Get the backend type
    fn backend(&self) -> Backend;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!(Backend::from_str("generate"), Some(Backend::Generate));
        assert_eq!(Backend::from_str("Ollama"), Some(Backend::Generate));
        assert_eq!(Backend::from_str(" chat "), Some(Backend::Chat));
        assert_eq!(Backend::from_str("openai"), Some(Backend::Chat));
        assert_eq!(Backend::from_str("grpc"), None);
    }

    #[test]
    fn test_backend_display_round_trip() {
        for backend in [Backend::Generate, Backend::Chat] {
            assert_eq!(Backend::from_str(&backend.to_string()), Some(backend));
        }
    }
}
