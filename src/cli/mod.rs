//! CLI argument parsing using clap 4.x derive macros

pub mod configure;

use askai_core::config::Overrides;
use clap::Parser;

/// Ask an LLM from the terminal
///
/// Pass a question as arguments, pipe text on stdin, or use `-i` to keep
/// the conversation going. Start a line with a persona tag such as
/// `@Poet` to switch the assistant's system prompt.
#[derive(Parser, Debug)]
#[command(name = "askai")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// The question to ask
    #[arg(num_args = 1..)]
    pub question: Vec<String>,

    /// Keep prompting for follow-up questions
    #[arg(short, long)]
    pub interactive: bool,

    /// Model to use (overrides the configured one)
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key to use (overrides the configured one)
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Set the API key and model interactively
    #[arg(long)]
    pub configure: bool,

    /// Write the global config instead of ./.askai.yaml
    #[arg(short, long, requires = "configure")]
    pub global: bool,

    /// Print version information
    #[arg(long)]
    pub version: bool,
}

impl Cli {
    /// Flag values that win over the config files
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_question_words_and_flags() {
        let cli = Cli::try_parse_from(["askai", "-i", "-m", "gpt-4o", "what", "is", "rust?"]).unwrap();
        assert!(cli.interactive);
        assert_eq!(cli.question, vec!["what", "is", "rust?"]);

        let overrides = cli.overrides();
        assert_eq!(overrides.model.as_deref(), Some("gpt-4o"));
        assert!(overrides.api_key.is_none());
    }

    #[test]
    fn test_api_key_flag() {
        let cli = Cli::try_parse_from(["askai", "--api-key", "sk-test", "hi"]).unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("sk-test"));
        assert!(!cli.interactive);
    }

    #[test]
    fn test_global_requires_configure() {
        assert!(Cli::try_parse_from(["askai", "-g"]).is_err());

        let cli = Cli::try_parse_from(["askai", "--configure", "-g"]).unwrap();
        assert!(cli.configure && cli.global);
    }
}
