//! `askai --configure`: store the API key and model in a config file

use std::path::PathBuf;

use anyhow::{Context, Result};
use askai_core::config::{self, Config};
use askai_core::llm::DEFAULT_MODEL;
use console::Style;
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

/// Prompt for settings and write them to the local or global file
///
/// Returns `false` if the user cancelled, in which case nothing is written.
pub fn run(global: bool) -> Result<bool> {
    let path = target_path(global)?;
    let existing = Config::load_optional(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .unwrap_or_default();

    let Some(answers) = prompt(&existing)? else {
        println!("↩️  Cancelled - keeping current settings.");
        return Ok(false);
    };

    let updated = apply(existing, answers);
    updated
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("saved configuration to {}", path.display());

    println!(
        "✅ Configuration saved to {}",
        Style::new().green().apply_to(path.display())
    );
    Ok(true)
}

fn target_path(global: bool) -> Result<PathBuf> {
    if global {
        config::global_config_path().context("Could not determine the config directory")
    } else {
        Ok(config::local_config_path())
    }
}

/// Raw prompt answers; a blank key means "keep the current one"
struct Answers {
    api_key: String,
    model: String,
}

fn prompt(existing: &Config) -> Result<Option<Answers>> {
    let key_help = if existing.api_key.is_empty() {
        "Paste the key for your OpenAI-compatible endpoint"
    } else {
        "Leave blank to keep the current key"
    };
    let api_key = Password::new("API Key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message(key_help)
        .prompt();
    let api_key = match api_key {
        Ok(key) => key,
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            return Ok(None)
        }
        Err(e) => return Err(e.into()),
    };

    let current_model = if existing.model.is_empty() {
        DEFAULT_MODEL
    } else {
        existing.model.as_str()
    };
    let model = match Text::new("Model:").with_default(current_model).prompt() {
        Ok(model) => model,
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            return Ok(None)
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Some(Answers { api_key, model }))
}

/// Fold the answers into the existing file contents
fn apply(mut config: Config, answers: Answers) -> Config {
    let api_key = answers.api_key.trim();
    if !api_key.is_empty() {
        config.api_key = api_key.to_string();
    }
    let model = answers.model.trim();
    if !model.is_empty() {
        config.model = model.to_string();
    }
    config
}
