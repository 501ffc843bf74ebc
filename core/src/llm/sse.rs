//! Server-sent event decoding for OpenAI-style streaming responses
//!
//! The body arrives as arbitrary byte chunks. `SseDecoder` reassembles
//! complete lines (splitting on bytes, so a multi-byte character cut
//! between two chunks is decoded intact) and `parse_line` turns a line into
//! an `SseEvent`.

use serde::Deserialize;

/// One decoded server-sent event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A content delta
    Fragment(String),
    /// The `[DONE]` terminator
    Done,
    /// An error payload sent in-band by the service
    Error(String),
    /// A data line that could not be parsed
    Malformed(String),
}

/// Line reassembly over a chunked byte stream
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and drain every complete line it finishes
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            lines.push(line.trim_end_matches('\r').to_string());
        }
        lines
    }

    /// Whatever is left once the body ends without a final newline
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&rest).trim_end_matches('\r').to_string();
        (!line.is_empty()).then_some(line)
    }
}

/// Parse one SSE line
///
/// Returns `None` for blank lines, comments and non-`data` fields, and for
/// chunks that carry no content (role-only deltas, finish markers).
pub fn parse_line(line: &str) -> Option<SseEvent> {
    let data = line.strip_prefix("data:")?.trim_start();

    if data == "[DONE]" {
        return Some(SseEvent::Done);
    }

    let chunk: StreamChunk = match serde_json::from_str(data) {
        Ok(chunk) => chunk,
        Err(e) => return Some(SseEvent::Malformed(format!("{}: {}", e, data))),
    };

    if let Some(error) = chunk.error {
        return Some(SseEvent::Error(error.message));
    }

    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty())
        .map(SseEvent::Fragment)
}

/// Extract `error.message` from a JSON error body
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}
