//! Structured error types for askai
//!
//! Every failure the session engine can surface is one of these variants.
//! The binary turns them into a non-zero exit; nothing inside the core
//! retries or rewrites them.

use thiserror::Error;

/// Primary error type for askai operations
#[derive(Error, Debug)]
pub enum AskaiError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Missing or invalid configuration (credentials, base URL, config file)
    #[error("configuration error: {message}")]
    Config { message: String },

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Reading piped or interactive input failed
    #[error("input error: {message}")]
    Input { message: String },

    // =========================================================================
    // Completion Errors
    // =========================================================================
    /// Connection could not be established or broke mid-stream
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The completion service rejected the request
    ///
    /// `status` is the HTTP status of a non-success response, or `None`
    /// when the error arrived inside an otherwise successful stream.
    #[error("request rejected{}: {message}", status_suffix(.status))]
    Request { status: Option<u16>, message: String },

    /// The in-flight turn was cancelled
    #[error("interrupted")]
    Interrupted,

    // =========================================================================
    // External Error Wrappers
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("YAML error: {0}")]
    Yaml(String),
}

impl AskaiError {
    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Shorthand for an input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Shorthand for a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Errors that abort a single turn (as opposed to setup failures)
    pub fn is_turn_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Request { .. } | Self::Interrupted
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Request { status: Some(401), .. } => {
                "Authentication failed. Please check your API key.".to_string()
            }
            Self::Request { status: Some(429), .. } => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            Self::Request { status: Some(404), message } => {
                format!("The requested model or endpoint was not found: {}", message)
            }
            Self::Interrupted => "Interrupted.".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for AskaiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yml::Error> for AskaiError {
    fn from(err: serde_yml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

/// Result type alias using AskaiError
pub type Result<T> = std::result::Result<T, AskaiError>;
