// src/intent/taxonomy.rs
// Closed set of request categories and their prompt descriptions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a user request is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Conversational,
    DeviceChange,
    PresetChange,
    DeviceAction,
}

/// Category keys and descriptions, in prompt order.
///
/// Kept as a static table so prompt rendering is order-stable and the
/// enum itself carries no behavior beyond its wire key.
pub const CATEGORY_DESCRIPTIONS: [(IntentCategory, &str); 4] = [
    (
        IntentCategory::Conversational,
        "General conversation, questions or small talk that does not ask to control or configure anything in the home.",
    ),
    (
        IntentCategory::DeviceChange,
        "Adding, removing, renaming or reconfiguring a device, such as moving a lamp to another room or changing its settings permanently.",
    ),
    (
        IntentCategory::PresetChange,
        "Creating, editing or deleting a preset, scene or routine that groups several device states together.",
    ),
    (
        IntentCategory::DeviceAction,
        "An immediate action on an existing device, such as turning it on or off, adjusting brightness, volume or temperature.",
    ),
];

impl IntentCategory {
    /// All categories in prompt order
    pub const ALL: [IntentCategory; 4] = [
        IntentCategory::Conversational,
        IntentCategory::DeviceChange,
        IntentCategory::PresetChange,
        IntentCategory::DeviceAction,
    ];

    /// Wire key used in prompts and in `request_type`
    pub fn key(&self) -> &'static str {
        match self {
            Self::Conversational => "conversational",
            Self::DeviceChange => "device_change",
            Self::PresetChange => "preset_change",
            Self::DeviceAction => "device_action",
        }
    }

    /// Parse a wire key. Exact match only; the model must use the listed keys.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Look up the human-readable description for a category
pub fn description(category: IntentCategory) -> &'static str {
    CATEGORY_DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, d)| *d)
        .unwrap_or_default()
}
