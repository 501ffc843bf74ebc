//! Turn rendering onto the output sink
//!
//! Interactive sessions get speaker labels and spacing around each turn.
//! Single-shot sessions write nothing but the answer fragments, so the
//! output can be piped straight into another program.

use console::Style;
use std::io::{self, Write};

/// Label shown above an answer
pub fn answer_label(active_tag: Option<&str>) -> String {
    match active_tag {
        Some(tag) => format!("AI ({})", tag),
        None => "AI".to_string(),
    }
}

/// Writes turns to an output sink
pub struct Renderer<W: Write> {
    out: W,
    interactive: bool,
    mid_answer: bool,
    you: Style,
    ai: Style,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, interactive: bool) -> Self {
        Self {
            out,
            interactive,
            mid_answer: false,
            you: Style::new().black().on_cyan(),
            ai: Style::new().black().on_white(),
        }
    }

    /// Echo the user's message under a `You` label
    pub fn user_turn(&mut self, content: &str) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }
        writeln!(self.out, "{}", self.you.apply_to(" You "))?;
        writeln!(self.out, "{}", content.trim())?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn begin_answer(&mut self, label: &str) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }
        writeln!(self.out, "{}", self.ai.apply_to(format!(" {} ", label)))?;
        self.out.flush()
    }

    /// Write one fragment and flush it so it shows up immediately
    pub fn fragment(&mut self, fragment: &str) -> io::Result<()> {
        self.mid_answer = true;
        self.out.write_all(fragment.as_bytes())?;
        self.out.flush()
    }

    /// Whether answer text was written and the answer not yet closed
    pub fn mid_answer(&self) -> bool {
        self.mid_answer
    }

    pub fn end_answer(&mut self) -> io::Result<()> {
        self.mid_answer = false;
        if !self.interactive {
            return Ok(());
        }
        write!(self.out, "\n\n")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_label() {
        assert_eq!(answer_label(None), "AI");
        assert_eq!(answer_label(Some("@Poet")), "AI (@Poet)");
    }

    #[test]
    fn test_single_shot_writes_only_fragments() {
        let mut out = Vec::new();
        {
            let mut renderer = Renderer::new(&mut out, false);
            renderer.user_turn("2+2?").unwrap();
            renderer.begin_answer("AI").unwrap();
            renderer.fragment("4").unwrap();
            renderer.end_answer().unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "4");
    }

    #[test]
    fn test_mid_answer_tracks_open_answers() {
        let mut renderer = Renderer::new(Vec::new(), false);
        assert!(!renderer.mid_answer());

        renderer.begin_answer("AI").unwrap();
        assert!(!renderer.mid_answer());
        renderer.fragment("Hel").unwrap();
        assert!(renderer.mid_answer());
        renderer.end_answer().unwrap();
        assert!(!renderer.mid_answer());
    }

    #[test]
    fn test_interactive_layout() {
        let mut out = Vec::new();
        {
            let mut renderer = Renderer::new(&mut out, true);
            renderer.user_turn("  hi there \n").unwrap();
            renderer.begin_answer(&answer_label(Some("@Poet"))).unwrap();
            renderer.fragment("Hel").unwrap();
            renderer.fragment("lo").unwrap();
            renderer.end_answer().unwrap();
        }
        let text = console::strip_ansi_codes(&String::from_utf8(out).unwrap()).to_string();
        assert_eq!(text, " You \nhi there\n\n AI (@Poet) \nHello\n\n");
    }
}
