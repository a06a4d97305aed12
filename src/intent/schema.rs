// src/intent/schema.rs
// Classification output contract: prompt instructions and validation

use serde::Serialize;
use serde_json::Value;

use super::taxonomy::{CATEGORY_DESCRIPTIONS, IntentCategory};
use crate::error::SchemaViolation;

const REQUEST_TYPE: &str = "request_type";
const DESCRIPTION: &str = "description";

/// A structured value the model is asked to emit.
///
/// `instructions` is prepended to every prompt; `from_value` is the only way
/// to turn decoded model output into `Self`.
pub trait OutputSchema: Sized {
    fn instructions() -> String;

    fn from_value(value: Value) -> Result<Self, SchemaViolation>;
}

/// Validated classification of a single request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    #[serde(rename = "request_type")]
    category: IntentCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Classification {
    pub fn category(&self) -> IntentCategory {
        self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl OutputSchema for Classification {
    fn instructions() -> String {
        render_instructions(&CATEGORY_DESCRIPTIONS)
    }

    fn from_value(value: Value) -> Result<Self, SchemaViolation> {
        let Value::Object(map) = value else {
            return Err(SchemaViolation::NotAnObject);
        };

        let category = match map.get(REQUEST_TYPE) {
            None => return Err(SchemaViolation::MissingField(REQUEST_TYPE)),
            Some(Value::String(key)) => IntentCategory::from_key(key)
                .ok_or_else(|| SchemaViolation::UnknownCategory(key.clone()))?,
            Some(_) => {
                return Err(SchemaViolation::WrongType {
                    field: REQUEST_TYPE,
                    expected: "string",
                });
            }
        };

        let description = match map.get(DESCRIPTION) {
            None => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => {
                return Err(SchemaViolation::WrongType {
                    field: DESCRIPTION,
                    expected: "string",
                });
            }
        };

        if let Some(extra) = map
            .keys()
            .find(|k| k.as_str() != REQUEST_TYPE && k.as_str() != DESCRIPTION)
        {
            return Err(SchemaViolation::UnexpectedField(extra.clone()));
        }

        Ok(Self {
            category,
            description,
        })
    }
}

/// Render the classification instruction block for a category table.
/// Output depends only on the table contents and order.
pub fn render_instructions(categories: &[(IntentCategory, &str)]) -> String {
    let mut out = String::from(
        "You classify requests sent to a smart-home assistant.\n\
         Choose exactly one of the following categories:\n\n",
    );

    for (category, description) in categories {
        out.push_str(&format!("- {}: {}\n", category.key(), description));
    }

    let keys = categories
        .iter()
        .map(|(c, _)| format!("\"{}\"", c.key()))
        .collect::<Vec<_>>()
        .join(", ");

    out.push_str(&format!(
        "\nRespond with a single JSON object containing exactly two fields:\n\
         - \"{REQUEST_TYPE}\": one of {keys}\n\
         - \"{DESCRIPTION}\": a short explanation of why the request belongs to that category\n\
         Output only the JSON object. Do not wrap it in markdown code fences and do not add any other text.\n"
    ));

    out
}

/// Join schema instructions and the literal user text into the prompt sent to the model
pub fn compose_prompt(instructions: &str, user_input: &str) -> String {
    format!("{instructions}\nUser request:\n{user_input}\n")
}
