//! Inference Engine - prompt text in, free-form text out
//!
//! The engine is a black box behind the `InferenceEngine` trait. Its reply
//! shape is not stable, so every reply goes through `InferenceReply::into_text`
//! before the agent uses it.

pub mod engine;
pub mod reply;
pub mod http;

pub use engine::{InferenceEngine, ChatMessage, ChatRequest, Unconfigured, DEFAULT_MODEL};
pub use reply::InferenceReply;
pub use http::HttpInference;
