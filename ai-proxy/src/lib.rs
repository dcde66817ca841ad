//! # AI Proxy
//!
//! Turns coding-help requests into natural-language prompts and forwards them
//! to a text-generation endpoint (Google Gemini), returning the first
//! generated candidate as plain text. One round trip per call, no retries.

mod assistant;
mod client;
mod config;
mod error;
pub mod prompts;

pub use assistant::AiAssistant;
pub use client::{GeminiClient, TextGenerator};
pub use config::GeminiConfig;
pub use error::Error;

/// Result type for AI proxy operations
pub type Result<T> = std::result::Result<T, Error>;
