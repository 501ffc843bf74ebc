//! Streaming client for OpenAI-compatible chat completion APIs
//!
//! Works with OpenAI itself and anything that speaks the same
//! `/chat/completions` protocol (Ollama, LM Studio, OpenRouter, ...).

use super::{
    chat::{ChatMessage, ChatRequest},
    sse::{self, SseDecoder, SseEvent},
    stream::{CompletionClient, ResponseStream},
    LlmConfig,
};
use crate::error::{AskaiError, Result};
use crate::util::{sanitize_base_url, validate_api_key};
use futures::{Stream, StreamExt};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client as HttpClient, StatusCode,
};
use tracing::{debug, warn};

/// Main LLM Client
pub struct LlmClient {
    config: LlmConfig,
    http_client: HttpClient,
}

impl LlmClient {
    /// Create a new LLM client
    ///
    /// Fails with a configuration error when the API key or base URL
    /// cannot be used in a request.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let api_key = validate_api_key(&config.api_key)?;
        let base_url = sanitize_base_url(&config.base_url, "Base URL")?;

        let http_client = HttpClient::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("askai/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AskaiError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(LlmClient {
            config: LlmConfig {
                api_key,
                base_url,
                ..config
            },
            http_client,
        })
    }

    /// Get the base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build headers for API requests
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = format!("Bearer {}", self.config.api_key)
            .parse::<HeaderValue>()
            .map_err(|_| AskaiError::config("Invalid Authorization header"))?;
        headers.insert(AUTHORIZATION, auth_value);

        // OpenRouter asks clients to identify themselves
        if self.config.base_url.contains("openrouter.ai") {
            headers.insert("X-Title", HeaderValue::from_static("askai"));
        }

        Ok(headers)
    }

    fn fragments<'a>(
        &'a self,
        history: &'a [ChatMessage],
        model: &'a str,
    ) -> impl Stream<Item = Result<String>> + Send + 'a {
        let url = format!("{}/chat/completions", self.config.base_url);
        let headers = self.build_headers();

        async_stream::try_stream! {
            let headers = headers?;
            let body = serde_json::to_vec(&ChatRequest::streaming(model, history))?;

            debug!(%url, model, messages = history.len(), "sending streaming completion request");
            let response = self
                .http_client
                .post(&url)
                .headers(headers)
                .body(body)
                .send()
                .await
                .map_err(|e| AskaiError::transport(format!("Failed to send request: {}", e)))?;

            let status = response.status();
            if !status.is_success() {
                let text = match response.text().await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(%status, error = %e, "failed to read error response body");
                        String::new()
                    }
                };
                Err::<(), _>(rejection(status, &text))?;
                return;
            }

            let mut body = response.bytes_stream();
            let mut decoder = SseDecoder::new();

            while let Some(chunk) = body.next().await {
                let chunk = chunk
                    .map_err(|e| AskaiError::transport(format!("Stream interrupted: {}", e)))?;

                for line in decoder.push(&chunk) {
                    match sse::parse_line(&line) {
                        Some(SseEvent::Fragment(fragment)) => {
                            yield fragment;
                        }
                        Some(SseEvent::Done) => {
                            debug!("completion stream finished");
                            return;
                        }
                        Some(SseEvent::Error(message)) => {
                            Err::<(), _>(AskaiError::Request { status: None, message })?;
                        }
                        Some(SseEvent::Malformed(detail)) => {
                            warn!(%detail, "skipping malformed stream event");
                        }
                        None => {}
                    }
                }
            }

            if let Some(line) = decoder.finish() {
                if let Some(SseEvent::Fragment(fragment)) = sse::parse_line(&line) {
                    yield fragment;
                }
            }
            debug!("completion stream closed without [DONE]");
        }
    }
}

impl CompletionClient for LlmClient {
    fn stream<'a>(&'a self, history: &'a [ChatMessage], model: &'a str) -> ResponseStream<'a> {
        ResponseStream::from_stream(self.fragments(history, model))
    }
}

/// Map a non-success HTTP response to a request error
fn rejection(status: StatusCode, body: &str) -> AskaiError {
    let message = sse::error_message(body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            trimmed.chars().take(200).collect()
        }
    });

    AskaiError::Request {
        status: Some(status.as_u16()),
        message,
    }
}
