//! Terminal collaborators: the interactive prompt and stdin piping

use std::io::{IsTerminal, Read};

use askai_core::error::{AskaiError, Result};
use askai_core::session::{InputEvent, InputSource};
use async_trait::async_trait;
use inquire::{InquireError, Text};

/// Reads questions with an `inquire` line prompt
pub struct PromptInput {
    message: String,
}

impl PromptInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for PromptInput {
    fn default() -> Self {
        Self::new(">")
    }
}

#[async_trait]
impl InputSource for PromptInput {
    async fn next_input(&mut self) -> Result<InputEvent> {
        let message = self.message.clone();
        tokio::task::spawn_blocking(move || prompt_line(&message))
            .await
            .map_err(|e| AskaiError::input(format!("prompt task failed: {}", e)))?
    }
}

/// Block until a non-blank line is entered or the prompt is cancelled
fn prompt_line(message: &str) -> Result<InputEvent> {
    loop {
        match Text::new(message).prompt() {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => return Ok(InputEvent::Line(line)),
            Err(e) => return event_for_error(e),
        }
    }
}

fn event_for_error(error: InquireError) -> Result<InputEvent> {
    match error {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            Ok(InputEvent::Abort)
        }
        other => Err(AskaiError::input(other.to_string())),
    }
}

/// Whole of stdin when something is piped in, `None` on a terminal
pub fn read_piped_stdin() -> Result<Option<String>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut piped = String::new();
    stdin
        .lock()
        .read_to_string(&mut piped)
        .map_err(|e| AskaiError::input(format!("failed to read stdin: {}", e)))?;
    log::debug!("read {} bytes from stdin", piped.len());
    Ok(Some(piped))
}
