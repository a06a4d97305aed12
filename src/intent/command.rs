// src/intent/command.rs
// Open-ended structured device command extraction schema

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::OutputSchema;
use crate::error::SchemaViolation;

/// Structured command the model extracts from a free-text request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCommand {
    pub action: String,
    #[serde(default)]
    pub devices: Vec<String>,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl OutputSchema for DeviceCommand {
    fn instructions() -> String {
        "You translate requests sent to a smart-home assistant into a device command.\n\
         Respond with a single JSON object with these fields:\n\
         - \"action\": the service to perform, for example \"turn_on\", \"turn_off\" or \"set_temperature\"\n\
         - \"devices\": a list of the device names or entity ids the action applies to\n\
         - \"params\": an object with any extra parameters, such as {\"brightness\": 40}\n\
         Output only the JSON object. Do not wrap it in markdown code fences and do not add any other text.\n"
            .to_string()
    }

    fn from_value(value: Value) -> Result<Self, SchemaViolation> {
        if !value.is_object() {
            return Err(SchemaViolation::NotAnObject);
        }
        let command: DeviceCommand =
            serde_json::from_value(value).map_err(|e| SchemaViolation::Invalid(e.to_string()))?;
        if command.action.trim().is_empty() {
            return Err(SchemaViolation::Invalid("action must not be empty".into()));
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_command() {
        let cmd = DeviceCommand::from_value(json!({
            "action": "turn_on",
            "devices": ["light.kitchen", "light.hall"],
            "params": {"brightness": 40}
        }))
        .unwrap();
        assert_eq!(cmd.action, "turn_on");
        assert_eq!(cmd.devices, vec!["light.kitchen", "light.hall"]);
        assert_eq!(cmd.params["brightness"], 40);
    }

    #[test]
    fn test_devices_and_params_default_empty() {
        let cmd = DeviceCommand::from_value(json!({"action": "turn_off"})).unwrap();
        assert!(cmd.devices.is_empty());
        assert!(cmd.params.is_empty());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let cmd = DeviceCommand::from_value(json!({"action": "toggle", "confidence": 1})).unwrap();
        assert_eq!(cmd.action, "toggle");
    }

    #[test]
    fn test_missing_action_rejected() {
        let err = DeviceCommand::from_value(json!({"devices": ["tv"]})).unwrap_err();
        assert!(matches!(err, SchemaViolation::Invalid(msg) if msg.contains("action")));
    }

    #[test]
    fn test_blank_action_rejected() {
        let err = DeviceCommand::from_value(json!({"action": "  "})).unwrap_err();
        assert!(matches!(err, SchemaViolation::Invalid(_)));
    }

    #[test]
    fn test_wrong_device_type_rejected() {
        let err = DeviceCommand::from_value(json!({"action": "turn_on", "devices": "tv"}));
        assert!(err.is_err());
    }

    #[test]
    fn test_non_object_rejected() {
        assert_eq!(
            DeviceCommand::from_value(json!([1, 2])).unwrap_err(),
            SchemaViolation::NotAnObject
        );
    }
}
