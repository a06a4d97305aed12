// src/device/home_assistant.rs
// Home Assistant REST client: /api/states and /api/services

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use super::{DeviceBackend, DeviceState};
use crate::config::HomeAssistantConfig;
use crate::error::{HassIntentError, Result};
use crate::http::{DEVICE_TIMEOUT, create_client, normalize_base_url};

const STATES_PATH: &str = "api/states";
const SERVICES_PATH: &str = "api/services";

/// Thin wrapper over the Home Assistant REST API
pub struct HomeAssistantClient {
    base_url: String,
    token: String,
    http: Client,
}

impl HomeAssistantClient {
    pub fn new(config: &HomeAssistantConfig) -> Self {
        Self {
            base_url: normalize_base_url(&config.base_url),
            token: config.token.clone(),
            http: create_client(DEVICE_TIMEOUT),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn network_error(&self, path: &str, err: reqwest::Error) -> HassIntentError {
        let msg = if err.is_connect() {
            format!(
                "cannot connect to Home Assistant at '{}'; check the URL and that Home Assistant is running",
                self.base_url
            )
        } else if err.is_timeout() {
            format!("timeout connecting to Home Assistant at '{}'", self.base_url)
        } else {
            format!("network error accessing {}: {}", path, err)
        };
        HassIntentError::Device(msg)
    }

    async fn check_status(&self, path: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error response".to_string());
        let msg = match status.as_u16() {
            401 => "authentication failed; check that the Home Assistant token is valid".to_string(),
            403 => "access forbidden; the Home Assistant token lacks permission".to_string(),
            404 => format!("Home Assistant API endpoint not found: {}", path),
            500..=599 => format!("Home Assistant server error ({}): {}", status, body),
            _ => format!("HTTP error {} accessing {}: {}", status, path, body),
        };
        Err(HassIntentError::Device(msg))
    }
}

#[async_trait]
impl DeviceBackend for HomeAssistantClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_devices(&self) -> Result<Vec<DeviceState>> {
        let response = self
            .http
            .get(self.url(STATES_PATH))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| self.network_error(STATES_PATH, e))?;
        let response = self.check_status(STATES_PATH, response).await?;

        let states: Vec<DeviceState> = response
            .json()
            .await
            .map_err(|e| HassIntentError::Device(format!("failed to parse states: {}", e)))?;
        debug!(count = states.len(), "Fetched device states");
        Ok(states)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn invoke_service(
        &self,
        domain: &str,
        service: &str,
        entity_id: &str,
    ) -> Result<Option<Value>> {
        if domain.is_empty() || service.is_empty() || entity_id.is_empty() {
            return Err(HassIntentError::InvalidInput(
                "domain, service and entity_id are required".into(),
            ));
        }

        let path = format!("{}/{}/{}", SERVICES_PATH, domain, service);
        let response = self
            .http
            .post(self.url(&path))
            .bearer_auth(&self.token)
            .json(&json!({ "entity_id": entity_id }))
            .send()
            .await
            .map_err(|e| self.network_error(&path, e))?;
        let response = self.check_status(&path, response).await?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_normalizes_base_url() {
        let client = HomeAssistantClient::new(&HomeAssistantConfig {
            base_url: "http://homeassistant.local:8123/".into(),
            token: "t".into(),
        });
        assert_eq!(client.base_url(), "http://homeassistant.local:8123");
        assert_eq!(client.url(STATES_PATH), "http://homeassistant.local:8123/api/states");
    }

    #[tokio::test]
    async fn test_invoke_service_requires_fields() {
        let client = HomeAssistantClient::new(&HomeAssistantConfig {
            base_url: "http://127.0.0.1:1".into(),
            token: "t".into(),
        });
        let result = client.invoke_service("media_player", "", "media_player.tv").await;
        assert!(matches!(result, Err(HassIntentError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_device_error() {
        let client = HomeAssistantClient::new(&HomeAssistantConfig {
            base_url: "http://127.0.0.1:1".into(),
            token: "t".into(),
        });
        let result = client.list_devices().await;
        assert!(matches!(result, Err(HassIntentError::Device(_))));
    }
}
