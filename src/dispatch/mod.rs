// src/dispatch/mod.rs
// Route a validated classification to its intent handler

mod handlers;
mod outcome;

pub use handlers::{DeviceActionHandler, HandlerResult, IntentHandler, UnimplementedHandler};
pub use outcome::{
    DEVICE_ACTION_SUCCESS, DispatchOutcome, DispatchStatus, EMPTY_INPUT, NOT_IMPLEMENTED,
};

use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::error::ClassifyError;
use crate::intent::{Classifier, IntentCategory};

/// Caller-facing message for a completed handler. Device actions always
/// report the fixed success message; the handler's own text is only logged.
fn success_message(category: IntentCategory, detail: String) -> String {
    match category {
        IntentCategory::DeviceAction => DEVICE_ACTION_SUCCESS.to_string(),
        _ => detail,
    }
}

/// Classifies a request and hands it to the handler for its category.
/// Never fails: every error becomes a `DispatchOutcome` with status `error`.
pub struct Dispatcher {
    classifier: Classifier,
    handlers: HashMap<IntentCategory, Arc<dyn IntentHandler>>,
}

impl Dispatcher {
    /// Default wiring: device actions handled, everything else unimplemented
    pub fn new(classifier: Classifier) -> Self {
        let unimplemented: Arc<dyn IntentHandler> = Arc::new(UnimplementedHandler);
        let mut handlers: HashMap<IntentCategory, Arc<dyn IntentHandler>> = IntentCategory::ALL
            .into_iter()
            .map(|c| (c, unimplemented.clone()))
            .collect();
        handlers.insert(IntentCategory::DeviceAction, Arc::new(DeviceActionHandler));

        Self {
            classifier,
            handlers,
        }
    }

    /// Replace the handler for one category
    pub fn with_handler(mut self, category: IntentCategory, handler: Arc<dyn IntentHandler>) -> Self {
        self.handlers.insert(category, handler);
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub async fn dispatch(&self, user_input: &str) -> DispatchOutcome {
        self.dispatch_with_cancel(user_input, &CancellationToken::new())
            .await
    }

    #[instrument(skip(self, user_input, cancel), fields(input_len = user_input.len()))]
    pub async fn dispatch_with_cancel(
        &self,
        user_input: &str,
        cancel: &CancellationToken,
    ) -> DispatchOutcome {
        let classification = match self.classifier.classify_with_cancel(user_input, cancel).await {
            Ok(c) => c,
            Err(ClassifyError::EmptyInput) => return DispatchOutcome::error(EMPTY_INPUT),
            Err(e) => {
                warn!(error = %e, "Classification failed");
                return DispatchOutcome::error(format!("Error processing request: {}", e));
            }
        };

        let category = classification.category();
        info!(request_type = %category, "Request classified");

        let Some(handler) = self.handlers.get(&category) else {
            return DispatchOutcome::classified(DispatchStatus::NotImplemented, NOT_IMPLEMENTED, &classification);
        };

        match handler.handle(user_input).await {
            Ok(HandlerResult::Completed(detail)) => {
                debug!(request_type = %category, detail = %detail, "Handler completed");
                DispatchOutcome::classified(
                    DispatchStatus::Success,
                    success_message(category, detail),
                    &classification,
                )
            }
            Ok(HandlerResult::NotImplemented) => {
                DispatchOutcome::classified(DispatchStatus::NotImplemented, NOT_IMPLEMENTED, &classification)
            }
            Err(e) => {
                warn!(request_type = %category, error = %e, "Handler failed");
                DispatchOutcome::classified(
                    DispatchStatus::Error,
                    format!("Error processing request: {}", e),
                    &classification,
                )
            }
        }
    }
}
