//! Test utilities for hass-intent integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use hass_intent::device::{DeviceBackend, DeviceState};
use hass_intent::dispatch::{HandlerResult, IntentHandler};
use hass_intent::error::GatewayError;
use hass_intent::llm::{Backend, LlmGateway};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Gateway that replays a fixed script of responses and records every call
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: AtomicU32,
    prompts: Mutex<Vec<String>>,
    params: Mutex<Vec<(String, f32)>>,
}

impl ScriptedGateway {
    pub fn new(script: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
            params: Mutex::new(Vec::new()),
        }
    }

    /// Every call returns the same text
    pub fn always(text: &str, times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(text.to_string())).collect())
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// (model, temperature) for every call
    pub fn params(&self) -> Vec<(String, f32)> {
        self.params.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.params.lock().unwrap().push((model.to_string(), temperature));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("script exhausted".into())))
    }

    fn backend(&self) -> Backend {
        Backend::Generate
    }
}

pub fn ok(text: &str) -> Result<String, GatewayError> {
    Ok(text.to_string())
}

pub fn transport_err() -> Result<String, GatewayError> {
    Err(GatewayError::Transport("connection refused".into()))
}

pub fn status_err(status: u16) -> Result<String, GatewayError> {
    Err(GatewayError::Status {
        status,
        body: "backend unavailable".into(),
    })
}

pub fn envelope_err() -> Result<String, GatewayError> {
    Err(GatewayError::MalformedEnvelope("missing 'response' field".into()))
}

pub const DEVICE_ACTION: &str = r#"{"request_type": "device_action", "description": "turn a device on or off"}"#;
pub const CONVERSATIONAL: &str = r#"{"request_type": "conversational", "description": "small talk"}"#;
pub const UNKNOWN_CATEGORY: &str = r#"{"request_type": "lights_on", "description": "made up"}"#;
pub const NOT_JSON: &str = "Sure! The request is a device action.";

/// Handler that records the raw text it receives
#[derive(Default)]
pub struct RecordingHandler {
    pub inputs: Mutex<Vec<String>>,
}

#[async_trait]
impl IntentHandler for RecordingHandler {
    async fn handle(&self, user_input: &str) -> hass_intent::Result<HandlerResult> {
        self.inputs.lock().unwrap().push(user_input.to_string());
        Ok(HandlerResult::Completed("recorded".into()))
    }
}

/// Handler that always fails
pub struct FailingHandler;

#[async_trait]
impl IntentHandler for FailingHandler {
    async fn handle(&self, _user_input: &str) -> hass_intent::Result<HandlerResult> {
        Err(hass_intent::HassIntentError::Device("backend offline".into()))
    }
}

/// In-memory device backend
pub struct StaticDevices(pub Vec<DeviceState>);

#[async_trait]
impl DeviceBackend for StaticDevices {
    async fn list_devices(&self) -> hass_intent::Result<Vec<DeviceState>> {
        Ok(self.0.clone())
    }

    async fn invoke_service(
        &self,
        _domain: &str,
        _service: &str,
        _entity_id: &str,
    ) -> hass_intent::Result<Option<serde_json::Value>> {
        Ok(None)
    }
}
