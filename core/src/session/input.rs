//! Where user input comes from

use crate::error::Result;
use async_trait::async_trait;

/// One result of asking the user for input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line to send
    Line(String),
    /// The user cancelled the prompt; the session should end quietly
    Abort,
}

/// Interactive input provider
#[async_trait]
pub trait InputSource: Send {
    /// Wait for the next input line or an abort
    async fn next_input(&mut self) -> Result<InputEvent>;
}

/// Build the initial question from positional words and piped stdin
///
/// Words are joined with single spaces. Piped data is appended after a
/// blank line. An empty result means there is no initial question.
pub fn compose_question(words: &[String], piped: Option<&str>) -> Option<String> {
    let mut question = words.join(" ");

    if let Some(piped) = piped {
        if !question.is_empty() {
            question.push_str("\n\n");
        }
        question.push_str(piped);
    }

    (!question.is_empty()).then_some(question)
}
