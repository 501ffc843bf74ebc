//! Chat message types for completion requests
//!
//! The same `ChatMessage` shape is used for the persisted history in the
//! config file, the in-memory session log and the request body.

use serde::{Deserialize, Serialize};

/// Role of the message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message (persona instructions for the model)
    System,
    /// User message
    User,
    /// Assistant message (model response)
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for a streaming chat completion
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// ID of the model to use
    pub model: &'a str,
    /// Full conversation so far
    pub messages: &'a [ChatMessage],
    /// Always true for this client
    pub stream: bool,
}

impl<'a> ChatRequest<'a> {
    /// Create a new streaming chat request
    pub fn streaming(model: &'a str, messages: &'a [ChatMessage]) -> Self {
        ChatRequest {
            model,
            messages,
            stream: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_creation() {
        let user_msg = ChatMessage::user("Hello");
        assert_eq!(user_msg.role, MessageRole::User);
        assert_eq!(user_msg.content, "Hello");

        let system_msg = ChatMessage::system("You are helpful");
        assert_eq!(system_msg.role, MessageRole::System);
        assert_eq!(system_msg.content, "You are helpful");
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("Be brief"), ChatMessage::user("2+2?")];
        let request = ChatRequest::streaming("gpt-3.5-turbo", &messages);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "2+2?");
    }

    #[test]
    fn test_role_from_yaml() {
        let msg: ChatMessage = serde_yml::from_str("role: assistant\ncontent: hi\n").unwrap();
        assert_eq!(msg, ChatMessage::assistant("hi"));
    }
}
