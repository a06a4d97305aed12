// src/llm/http_client.rs
// Shared HTTP plumbing for gateway backends: one POST, errors classified

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::error::GatewayError;
use crate::http::create_client;

/// HTTP client bound to a per-request deadline
pub struct LlmHttpClient {
    client: Client,
    pub request_timeout: Duration,
}

impl LlmHttpClient {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            client: create_client(request_timeout),
            request_timeout,
        }
    }

    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// POST a JSON body once and return the response body text.
    ///
    /// Connection failures map to `Transport`, deadline expiry to `Timeout`,
    /// and any non-2xx status to `Status` with the body attached.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        api_key: Option<&str>,
        body: &B,
    ) -> Result<String, GatewayError> {
        let mut request = self.client.post(url).json(body);
        if let Some(key) = api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Backend returned non-success status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.request_timeout)
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}
