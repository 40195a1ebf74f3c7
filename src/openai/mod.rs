//! Chat-completion client for OpenAI-compatible endpoints.

pub(crate) mod client;
pub(crate) mod types;

pub use client::{Completion, CompletionError, OpenAiClient};
