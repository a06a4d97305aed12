// src/device/mod.rs
// Device backend capability (Home Assistant REST)

mod home_assistant;

pub use home_assistant::HomeAssistantClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// State record for a single entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<String>,
}

impl DeviceState {
    /// Domain prefix of the entity id (`media_player` for `media_player.tv`)
    pub fn domain(&self) -> &str {
        self.entity_id
            .split_once('.')
            .map(|(domain, _)| domain)
            .unwrap_or(&self.entity_id)
    }
}

/// Query and mutate devices
#[async_trait]
pub trait DeviceBackend: Send + Sync {
    async fn list_devices(&self) -> Result<Vec<DeviceState>>;

    /// Call `domain.service` on an entity. Returns `None` when the backend
    /// replies with an empty body.
    async fn invoke_service(
        &self,
        domain: &str,
        service: &str,
        entity_id: &str,
    ) -> Result<Option<Value>>;
}
