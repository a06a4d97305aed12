//! Classification retry loop behavior against a scripted gateway

mod test_utils;

use hass_intent::error::{AttemptError, ClassifyError, GatewayError, SchemaViolation};
use hass_intent::intent::{Classifier, CommandExtractor, IntentCategory};
use std::sync::Arc;
use test_utils::*;
use tokio_util::sync::CancellationToken;

fn classifier(gateway: &Arc<ScriptedGateway>) -> Classifier {
    Classifier::new(gateway.clone(), "mistral")
}

#[tokio::test]
async fn test_first_attempt_success_uses_one_call() {
    let gateway = Arc::new(ScriptedGateway::new(vec![ok(DEVICE_ACTION)]));
    let c = classifier(&gateway).classify("turn off the TV").await.unwrap();

    assert_eq!(c.category(), IntentCategory::DeviceAction);
    assert_eq!(c.description(), Some("turn a device on or off"));
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_every_category_is_returned_verbatim() {
    for category in IntentCategory::ALL {
        let body = format!(r#"{{"request_type": "{}"}}"#, category.key());
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(body)]));
        let c = classifier(&gateway).classify("some request").await.unwrap();
        assert_eq!(c.category(), category);
        assert_eq!(gateway.calls(), 1);
    }
}

#[tokio::test]
async fn test_mixed_failures_then_success() {
    // N = 2 failures (< max_attempts = 3) followed by a success
    let gateway = Arc::new(ScriptedGateway::new(vec![
        transport_err(),
        ok(NOT_JSON),
        ok(CONVERSATIONAL),
    ]));
    let c = classifier(&gateway).classify("how are you?").await.unwrap();

    assert_eq!(c.category(), IntentCategory::Conversational);
    assert_eq!(gateway.calls(), 3);
}

#[tokio::test]
async fn test_schema_failure_then_success() {
    let gateway = Arc::new(ScriptedGateway::new(vec![ok(UNKNOWN_CATEGORY), ok(DEVICE_ACTION)]));
    let c = classifier(&gateway).classify("lights on").await.unwrap();

    assert_eq!(c.category(), IntentCategory::DeviceAction);
    assert_eq!(gateway.calls(), 2);
}

#[tokio::test]
async fn test_all_attempts_fail_stops_at_bound() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        status_err(500),
        envelope_err(),
        ok(UNKNOWN_CATEGORY),
        ok(DEVICE_ACTION),
    ]));
    let err = classifier(&gateway).classify("lights on").await.unwrap_err();

    match err {
        ClassifyError::ClassificationFailed {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert!(matches!(
                last_error,
                AttemptError::Schema(SchemaViolation::UnknownCategory(ref k)) if k == "lights_on"
            ));
        }
        other => panic!("expected ClassificationFailed, got {other:?}"),
    }
    assert_eq!(gateway.calls(), 3, "no call beyond max_attempts");
}

#[tokio::test]
async fn test_custom_attempt_bound() {
    let gateway = Arc::new(ScriptedGateway::new(vec![]));
    let err = classifier(&gateway)
        .with_max_attempts(5)
        .classify("lights on")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClassifyError::ClassificationFailed {
            attempts: 5,
            last_error: AttemptError::Gateway(GatewayError::Transport(_))
        }
    ));
    assert_eq!(gateway.calls(), 5);
}

#[tokio::test]
async fn test_blank_input_rejected_without_gateway_call() {
    let gateway = Arc::new(ScriptedGateway::always(DEVICE_ACTION, 3));
    for input in ["", "   ", "\n\t"] {
        let err = classifier(&gateway).classify(input).await.unwrap_err();
        assert!(matches!(err, ClassifyError::EmptyInput));
    }
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_retries_reuse_identical_prompt_and_zero_temperature() {
    let gateway = Arc::new(ScriptedGateway::new(vec![ok(NOT_JSON), ok(NOT_JSON), ok(DEVICE_ACTION)]));
    classifier(&gateway).classify("turn on the kitchen light").await.unwrap();

    let prompts = gateway.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts.iter().all(|p| p == &prompts[0]));
    assert!(prompts[0].contains("turn on the kitchen light"));
    for key in ["conversational", "device_change", "preset_change", "device_action"] {
        assert!(prompts[0].contains(key), "prompt missing {key}");
    }

    for (model, temperature) in gateway.params() {
        assert_eq!(model, "mistral");
        assert_eq!(temperature, 0.0);
    }
}

#[tokio::test]
async fn test_cancelled_before_first_attempt() {
    let gateway = Arc::new(ScriptedGateway::always(DEVICE_ACTION, 1));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = classifier(&gateway)
        .classify_with_cancel("turn on the lamp", &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, ClassifyError::Cancelled));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_concurrent_classifications_are_independent() {
    let gateway = Arc::new(ScriptedGateway::always(DEVICE_ACTION, 8));
    let classifier = Arc::new(classifier(&gateway));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let classifier = classifier.clone();
            tokio::spawn(async move { classifier.classify(&format!("request {i}")).await })
        })
        .collect();

    for handle in handles {
        let c = handle.await.unwrap().unwrap();
        assert_eq!(c.category(), IntentCategory::DeviceAction);
    }
    assert_eq!(gateway.calls(), 8);
}

// ═══════════════════════════════════════
// Structured command extraction
// ═══════════════════════════════════════

#[tokio::test]
async fn test_command_extraction_single_attempt_by_default() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        ok(NOT_JSON),
        ok(r#"{"action": "turn_off", "devices": ["media_player.tv"]}"#),
    ]));
    let config = hass_intent::config::AppConfig::default();
    let extractor = CommandExtractor::from_config(gateway.clone(), &config);

    let err = extractor.extract("turn off the TV").await.unwrap_err();
    assert!(matches!(
        err,
        ClassifyError::ClassificationFailed {
            attempts: 1,
            last_error: AttemptError::Decode(_)
        }
    ));
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_command_extraction_opt_in_retries() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        ok(r#"{"devices": ["media_player.tv"]}"#),
        ok(r#"{"action": "turn_off", "devices": ["media_player.tv"], "params": {}}"#),
    ]));
    let extractor = CommandExtractor::new(gateway.clone(), "mistral").with_max_attempts(2);

    let command = extractor.extract("turn off the TV").await.unwrap();
    assert_eq!(command.action, "turn_off");
    assert_eq!(command.devices, vec!["media_player.tv"]);
    assert_eq!(gateway.calls(), 2);
    assert!(gateway.prompts()[0].contains("\"action\""));
}
