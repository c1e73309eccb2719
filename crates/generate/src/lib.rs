//! Component-generation collaborator.
//!
//! Wraps an OpenAI-compatible chat-completions API (x.ai/Grok) behind
//! [`GrokClient`]: natural-language command in, structured component
//! draft out. The client is deliberately opaque to callers -- it either
//! returns a normalized draft or a [`GenerateError`], and the API layer
//! decides what a failure means (fallback component, degraded response).

pub mod client;
pub mod draft;
pub mod prompt;

pub use client::{GenerateError, Generated, GrokClient};
