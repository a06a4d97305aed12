// src/llm/logging.rs
// Shared logging helpers for gateway calls and extraction attempts

use tracing::{debug, warn};

use super::provider::Backend;
use crate::error::AttemptError;

/// Log completion of one gateway call, tagged with the extraction's request id
/// so it lines up with any attempt failures logged for the same request.
pub fn log_generation(
    request_id: &str,
    backend: Backend,
    model: &str,
    duration_ms: u64,
    response_len: usize,
) {
    debug!(
        request_id = %request_id,
        backend = %backend,
        model = %model,
        duration_ms = duration_ms,
        response_len = response_len,
        "Generation complete"
    );
}

/// Log an attempt that did not yield a usable value.
pub fn log_attempt_failure(request_id: &str, attempt: u32, max_attempts: u32, error: &AttemptError) {
    let kind = match error {
        AttemptError::Gateway(_) => "gateway",
        AttemptError::Decode(_) => "decode",
        AttemptError::Schema(_) => "schema",
    };
    warn!(
        request_id = %request_id,
        attempt = attempt,
        max_attempts = max_attempts,
        kind = kind,
        error = %error,
        "Extraction attempt failed"
    );
}
