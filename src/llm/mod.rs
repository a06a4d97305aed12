// src/llm/mod.rs
// Text-generation gateways (Ollama generate, OpenAI-compatible chat)

mod chat;
mod factory;
mod http_client;
pub mod logging;
mod ollama;
mod provider;

pub use chat::ChatGateway;
pub use factory::create_gateway;
pub use http_client::LlmHttpClient;
pub use ollama::OllamaGateway;
pub use provider::{Backend, LlmGateway};
