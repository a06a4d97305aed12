// src/intent/mod.rs
// Intent taxonomy, output schemas and the bounded-retry classifier

mod command;
mod extractor;
mod schema;
mod taxonomy;

pub use command::DeviceCommand;
pub use extractor::{
    Classifier, CommandExtractor, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_ATTEMPTS, Extractor,
};
pub use schema::{Classification, OutputSchema, compose_prompt, render_instructions};
pub use taxonomy::{CATEGORY_DESCRIPTIONS, IntentCategory, description};
