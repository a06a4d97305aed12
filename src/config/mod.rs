// src/config/mod.rs
// Configuration loaded at the process edge and passed into the core

pub mod env;
pub mod file;

pub use env::{ConfigValidation, apply_env_overrides, process_env};
pub use file::{
    AppConfig, ClassifierConfig, CommandConfig, GatewayConfig, HomeAssistantConfig, ServerConfig,
};
