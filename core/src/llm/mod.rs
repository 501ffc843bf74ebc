//! LLM client module
//!
//! Provides the completion-client seam used by the session engine and
//! the OpenAI-compatible streaming implementation behind it.

pub mod chat;
pub mod client;
pub mod sse;
pub mod stream;

pub use chat::{ChatMessage, ChatRequest, MessageRole};
pub use client::LlmClient;
pub use stream::{CompletionClient, FragmentStream, ResponseStream};

use std::time::Duration;

/// Default OpenAI API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// LLM Configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API endpoint base URL
    pub base_url: String,
    /// API key sent as a bearer token
    pub api_key: String,
    /// Time allowed to establish the connection
    pub connect_timeout: Duration,
}

impl LlmConfig {
    /// Create a new LLM config
    pub fn new(base_url: String, api_key: String) -> Self {
        LlmConfig {
            base_url,
            api_key,
            connect_timeout: Duration::from_secs(30),
        }
    }
}
