// src/dispatch/handlers.rs
// Per-category intent handlers

use async_trait::async_trait;
use tracing::info;

use super::outcome::DEVICE_ACTION_SUCCESS;
use crate::error::Result;

/// What a handler did with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResult {
    Completed(String),
    NotImplemented,
}

/// Handles one intent category. Receives the raw user text, not the
/// classification; parameter extraction is a separate concern.
#[async_trait]
pub trait IntentHandler: Send + Sync {
    async fn handle(&self, user_input: &str) -> Result<HandlerResult>;
}

/// Device action handler. Reports completion without touching a device.
#[derive(Debug, Default)]
pub struct DeviceActionHandler;

#[async_trait]
impl IntentHandler for DeviceActionHandler {
    async fn handle(&self, user_input: &str) -> Result<HandlerResult> {
        info!(input_len = user_input.len(), "Device action request accepted");
        Ok(HandlerResult::Completed(DEVICE_ACTION_SUCCESS.to_string()))
    }
}

/// Placeholder for categories without an implementation
#[derive(Debug, Default)]
pub struct UnimplementedHandler;

#[async_trait]
impl IntentHandler for UnimplementedHandler {
    async fn handle(&self, _user_input: &str) -> Result<HandlerResult> {
        Ok(HandlerResult::NotImplemented)
    }
}
