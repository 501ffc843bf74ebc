//! `askai` - ask an LLM from the terminal
//!
//! One question in, one streamed answer out; or, with `-i`, a running
//! conversation with persona tags.

use anyhow::{Context, Result};
use clap::Parser;
use console::Style;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::terminal::PromptInput;
use askai_core::config::Config;
use askai_core::llm::LlmClient;
use askai_core::session::{compose_question, HistoryStore};
use askai_core::{SessionConfig, SessionEnd, SessionLoop};

mod cli;
mod terminal;

/// Environment variable holding the log filter, e.g. `ASKAI_LOG=debug`
const LOG_ENV: &str = "ASKAI_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    if cli.version {
        let blue = Style::new().blue();
        println!(
            "{} v{} ({})",
            blue.apply_to("askai"),
            env!("CARGO_PKG_VERSION"),
            env!("ASKAI_GIT_HASH")
        );
        return Ok(());
    }

    if cli.configure {
        cli::configure::run(cli.global)?;
        return Ok(());
    }

    let config = Config::load_default().context("Failed to load configuration")?;
    let resolved = config
        .resolve(&cli.overrides())
        .context("Invalid configuration")?;

    let piped = terminal::read_piped_stdin().context("Failed to read standard input")?;
    let question = compose_question(&cli.question, piped.as_deref());

    let client = LlmClient::new(resolved.llm_config()).context("Failed to create LLM client")?;
    log::info!(
        "using model {} at {} (interactive: {})",
        resolved.model,
        client.base_url(),
        cli.interactive
    );

    let session_config = SessionConfig {
        model: resolved.model.clone(),
        interactive: cli.interactive,
        initial_question: question,
    };
    let cancel = CancellationToken::new();
    watch_ctrl_c(cancel.clone());

    let mut session = SessionLoop::new(
        session_config,
        Arc::new(client),
        Arc::new(config.personas()),
        HistoryStore::with_messages(config.messages.clone()),
    )
    .with_cancellation(cancel);

    let mut input = PromptInput::default();
    let outcome = session.run(&mut input, std::io::stdout()).await;
    match outcome {
        Ok(SessionEnd::Completed) => {
            // Answers are streamed without a final newline in single-shot mode
            println!();
            Ok(())
        }
        Ok(SessionEnd::UserAbort) => {
            log::debug!("session ended by user after {} messages", session.history().len());
            Ok(())
        }
        Err(e) if e.is_turn_failure() => {
            // Close a half-written answer before the error goes to stderr
            if session.left_partial_answer() {
                println!();
            }
            Err(anyhow::anyhow!(e.user_message()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Log to stderr so answers on stdout stay clean
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Cancel the session on the first Ctrl-C
fn watch_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::debug!("received Ctrl-C");
            cancel.cancel();
        }
    });
}
