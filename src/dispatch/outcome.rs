// src/dispatch/outcome.rs
// Caller-facing result of classify-then-dispatch

use serde::{Deserialize, Serialize};

use crate::intent::{Classification, IntentCategory};

pub const DEVICE_ACTION_SUCCESS: &str = "Device action request processed successfully.";
pub const NOT_IMPLEMENTED: &str = "Only device action requests are implemented at this time.";
pub const EMPTY_INPUT: &str = "Request text is empty.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Success,
    NotImplemented,
    Error,
}

/// Terminal, always-structured result of `Dispatcher::dispatch`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub status: DispatchStatus,
    pub message: String,
    /// Category key, absent when classification did not succeed
    pub request_type: Option<IntentCategory>,
    pub description: Option<String>,
}

impl DispatchOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: DispatchStatus::Error,
            message: message.into(),
            request_type: None,
            description: None,
        }
    }

    pub(crate) fn classified(
        status: DispatchStatus,
        message: impl Into<String>,
        classification: &Classification,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            request_type: Some(classification.category()),
            description: classification.description().map(str::to_string),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DispatchStatus::Success
    }
}
