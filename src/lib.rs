// src/lib.rs
// hass-intent - classify free-text home requests with an LLM and dispatch them

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod intent;
pub mod llm;
pub mod web;

pub use error::{HassIntentError, Result};
