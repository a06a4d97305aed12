// src/http.rs
// Shared HTTP client construction and URL helpers

use std::time::Duration;
use tracing::warn;

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for Home Assistant REST calls
pub const DEVICE_TIMEOUT: Duration = Duration::from_secs(30);

/// Create an HTTP client with a total request deadline.
///
/// A builder failure is logged and falls back to a default client; callers
/// still bound each call with their own `tokio::time::timeout`.
pub fn create_client(request_timeout: Duration) -> reqwest::Client {
    try_create_client(request_timeout).unwrap_or_else(|e| {
        warn!(
            error = %e,
            timeout = ?request_timeout,
            "Failed to build HTTP client, falling back to defaults without a request timeout"
        );
        reqwest::Client::new()
    })
}

/// Build the configured client, surfacing builder errors
pub fn try_create_client(request_timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(request_timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(request_timeout))
        .pool_max_idle_per_host(10)
        .build()
}

/// Check if a URL points to a local address (localhost, 127.0.0.1, [::1])
pub fn is_local_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => match parsed.host() {
            Some(url::Host::Domain(d)) => d == "localhost",
            Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
            Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
            None => true,
        },
        Err(_) => true,
    }
}

/// Strip trailing slashes so paths can be appended with a single '/'
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
