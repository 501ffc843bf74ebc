//! The conversation loop
//!
//! Each turn goes: await input → resolve a leading tag → append the user
//! message → stream the answer → append the assistant message. The loop
//! ends after one turn in single-shot mode, when the user aborts the
//! prompt, or on the first error.

use std::io::Write;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::history::HistoryStore;
use super::input::{InputEvent, InputSource};
use super::persona::PersonaRegistry;
use super::render::{answer_label, Renderer};
use super::tag;
use crate::error::{AskaiError, Result};
use crate::llm::{ChatMessage, CompletionClient};

/// Fixed parameters of one session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// Keep prompting after the first answer
    pub interactive: bool,
    /// Question that satisfies the first prompt without asking
    pub initial_question: Option<String>,
}

/// How a session that did not fail came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The single-shot turn finished
    Completed,
    /// The user cancelled the interactive prompt
    UserAbort,
}

/// Drives turns against a completion client
pub struct SessionLoop {
    model: String,
    interactive: bool,
    pending_question: Option<String>,
    history: HistoryStore,
    active_tag: Option<String>,
    client: Arc<dyn CompletionClient>,
    personas: Arc<dyn PersonaRegistry>,
    cancel: CancellationToken,
    turns: usize,
    partial_answer: bool,
}

impl SessionLoop {
    pub fn new(
        config: SessionConfig,
        client: Arc<dyn CompletionClient>,
        personas: Arc<dyn PersonaRegistry>,
        history: HistoryStore,
    ) -> Self {
        Self {
            model: config.model,
            interactive: config.interactive,
            pending_question: config.initial_question,
            history,
            active_tag: None,
            client,
            personas,
            cancel: CancellationToken::new(),
            turns: 0,
            partial_answer: false,
        }
    }

    /// Observe `token` while waiting for input and while streaming
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Tag of the persona attributed to answers, if one was selected
    pub fn active_tag(&self) -> Option<&str> {
        self.active_tag.as_deref()
    }

    /// Whether the failed turn had already written part of its answer
    pub fn left_partial_answer(&self) -> bool {
        self.partial_answer
    }

    /// Run turns until the session ends
    ///
    /// Errors end the session immediately; the history keeps every turn
    /// that completed before the failure.
    pub async fn run<W: Write>(
        &mut self,
        input: &mut dyn InputSource,
        out: W,
    ) -> Result<SessionEnd> {
        if !self.interactive && self.pending_question.is_none() {
            return Err(AskaiError::input(
                "question is required when interactive mode is disabled",
            ));
        }

        let mut renderer = Renderer::new(out, self.interactive);

        loop {
            let line = match self.pending_question.take() {
                Some(question) => question,
                None => match self.await_input(input).await? {
                    InputEvent::Line(line) => line,
                    InputEvent::Abort => {
                        debug!(turns = self.turns, "session aborted at prompt");
                        return Ok(SessionEnd::UserAbort);
                    }
                },
            };

            if let Err(e) = self.run_turn(&line, &mut renderer).await {
                self.partial_answer = renderer.mid_answer();
                return Err(e);
            }

            if !self.interactive {
                return Ok(SessionEnd::Completed);
            }
        }
    }

    async fn await_input(&self, input: &mut dyn InputSource) -> Result<InputEvent> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Ok(InputEvent::Abort),
            event = input.next_input() => event,
        }
    }

    async fn run_turn<W: Write>(&mut self, line: &str, renderer: &mut Renderer<W>) -> Result<()> {
        self.turns += 1;

        let resolution = tag::resolve(line, self.personas.as_ref());
        if let Some(persona) = resolution.persona {
            debug!(turn = self.turns, tag = %persona.tag, "persona selected");
            self.history.append(ChatMessage::system(persona.content));
            self.active_tag = Some(persona.tag);
        }

        renderer.user_turn(&resolution.content)?;
        self.history.append(ChatMessage::user(resolution.content));

        let label = answer_label(self.active_tag.as_deref());
        let answer = self.stream_answer(renderer, &label).await?;
        renderer.end_answer()?;

        debug!(turn = self.turns, chars = answer.len(), "turn complete");
        self.history.append(ChatMessage::assistant(answer));
        Ok(())
    }

    /// Forward fragments as they arrive and return their concatenation
    ///
    /// The label is written just before the first fragment (or at the end
    /// of an empty answer), so a request that fails outright prints nothing.
    async fn stream_answer<W: Write>(
        &self,
        renderer: &mut Renderer<W>,
        label: &str,
    ) -> Result<String> {
        debug!(turn = self.turns, model = %self.model, messages = self.history.len(), "streaming answer");
        let mut stream = self.client.stream(self.history.snapshot(), &self.model);
        let mut answer = String::new();
        let mut started = false;

        loop {
            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    warn!(turn = self.turns, "turn cancelled mid-stream");
                    return Err(AskaiError::Interrupted);
                }
                next = stream.next_fragment() => next,
            };

            match next {
                Some(Ok(fragment)) => {
                    if !started {
                        renderer.begin_answer(label)?;
                        started = true;
                    }
                    renderer.fragment(&fragment)?;
                    answer.push_str(&fragment);
                }
                Some(Err(e)) => {
                    warn!(turn = self.turns, error = %e, "stream failed");
                    return Err(e);
                }
                None => break,
            }
        }

        if !started {
            renderer.begin_answer(label)?;
        }
        Ok(answer)
    }
}
