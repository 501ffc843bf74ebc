pub mod config;
pub mod error;
pub mod llm;
pub mod session;
pub mod util;

// Re-exports for convenience
pub use config::Config;
pub use error::{AskaiError, Result};
pub use session::{SessionConfig, SessionEnd, SessionLoop};
