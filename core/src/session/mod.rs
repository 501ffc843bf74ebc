//! Conversation session engine
//!
//! Ties together the history log, persona tags, the input source and the
//! completion client into the turn loop run by the `askai` binary.

pub mod engine;
pub mod history;
pub mod input;
pub mod persona;
pub mod render;
pub mod tag;

pub use engine::{SessionConfig, SessionEnd, SessionLoop};
pub use history::HistoryStore;
pub use input::{compose_question, InputEvent, InputSource};
pub use persona::{Persona, PersonaRegistry, StaticPersonaRegistry};
pub use tag::{resolve, Resolution};
