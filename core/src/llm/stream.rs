//! Completion client seam and the per-turn response stream

use crate::error::Result;
use futures::{Stream, StreamExt};
use std::pin::Pin;

use super::chat::ChatMessage;

/// Boxed stream of answer fragments as produced by a client
pub type FragmentStream<'a> = Pin<Box<dyn Stream<Item = Result<String>> + Send + 'a>>;

/// A remote streaming chat-completion service
///
/// Implementations send the full ordered history and hand back the answer
/// as a lazy sequence of string fragments. Nothing is sent until the
/// returned stream is first polled.
pub trait CompletionClient: Send + Sync {
    fn stream<'a>(&'a self, history: &'a [ChatMessage], model: &'a str) -> ResponseStream<'a>;
}

/// The answer stream for a single turn
///
/// Finite and not restartable: after the end of the stream or the first
/// error, `next_fragment` keeps returning `None`. The underlying
/// connection is released as soon as the stream ends, fails, or is
/// dropped.
pub struct ResponseStream<'a> {
    inner: Option<FragmentStream<'a>>,
    fragments: usize,
}

impl<'a> ResponseStream<'a> {
    pub fn new(inner: FragmentStream<'a>) -> Self {
        Self {
            inner: Some(inner),
            fragments: 0,
        }
    }

    /// Wrap any fragment stream
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<String>> + Send + 'a,
    {
        Self::new(Box::pin(stream))
    }

    /// Pull the next fragment
    ///
    /// Cancel-safe: dropping the returned future loses no fragment.
    pub async fn next_fragment(&mut self) -> Option<Result<String>> {
        let inner = self.inner.as_mut()?;
        match inner.next().await {
            Some(Ok(fragment)) => {
                self.fragments += 1;
                Some(Ok(fragment))
            }
            Some(Err(e)) => {
                self.release();
                Some(Err(e))
            }
            None => {
                self.release();
                None
            }
        }
    }

    /// Number of fragments yielded so far
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Whether the stream has ended, failed, or been released
    pub fn is_finished(&self) -> bool {
        self.inner.is_none()
    }

    fn release(&mut self) {
        if self.inner.take().is_some() {
            tracing::trace!(fragments = self.fragments, "response stream released");
        }
    }
}

impl Drop for ResponseStream<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AskaiError;

    #[tokio::test]
    async fn test_yields_in_order_then_ends() {
        let mut stream = ResponseStream::from_stream(futures::stream::iter(vec![
            Ok("Hel".to_string()),
            Ok("lo".to_string()),
        ]));

        assert_eq!(stream.next_fragment().await.unwrap().unwrap(), "Hel");
        assert_eq!(stream.next_fragment().await.unwrap().unwrap(), "lo");
        assert!(stream.next_fragment().await.is_none());
        assert!(stream.is_finished());
        assert_eq!(stream.fragments(), 2);

        // Not restartable
        assert!(stream.next_fragment().await.is_none());
    }

    #[tokio::test]
    async fn test_error_finishes_stream() {
        let mut stream = ResponseStream::from_stream(futures::stream::iter(vec![
            Ok("a".to_string()),
            Err(AskaiError::transport("reset")),
            Ok("never".to_string()),
        ]));

        assert!(stream.next_fragment().await.unwrap().is_ok());
        assert!(matches!(
            stream.next_fragment().await,
            Some(Err(AskaiError::Transport { .. }))
        ));
        assert!(stream.is_finished());
        assert!(stream.next_fragment().await.is_none());
    }
}
