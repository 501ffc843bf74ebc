//! Configuration Store
//!
//! Loads and saves the YAML config files and resolves them, together with
//! command-line overrides, into the values a session needs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AskaiError, Result};
use crate::llm::{ChatMessage, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::session::StaticPersonaRegistry;
use crate::util::{sanitize_base_url, validate_api_key};

/// Contents of one config file
///
/// Every field is optional on disk so a local file can override just the
/// parts it cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// API key for the completion service
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Chat model identifier
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,

    /// OpenAI-compatible endpoint (defaults to api.openai.com)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Conversation to seed every session with
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ChatMessage>,

    /// Personas keyed by tag, e.g. `"@Poet"`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub system_messages: BTreeMap<String, SystemMessage>,
}

/// A persona entry; either a bare string or `{content: ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SystemMessage {
    Text(String),
    Detailed { content: String },
}

impl SystemMessage {
    pub fn content(&self) -> &str {
        match self {
            SystemMessage::Text(content) | SystemMessage::Detailed { content } => content,
        }
    }
}

/// Values given on the command line, which win over every file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// Validated settings for the completion client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl ResolvedConfig {
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig::new(self.base_url.clone(), self.api_key.clone())
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AskaiError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| AskaiError::config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load a file that may not exist yet
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(content)?)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yml::to_string(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Global file first, local file on top; missing files are skipped
    pub fn load_layered(global: Option<&Path>, local: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        for path in [global, local].into_iter().flatten() {
            if let Some(layer) = Self::load_optional(path)? {
                tracing::debug!(path = %path.display(), "loaded config layer");
                config.merge(layer);
            }
        }
        Ok(config)
    }

    /// Load from the standard global and local locations
    pub fn load_default() -> Result<Self> {
        let global = super::global_config_path();
        let local = super::local_config_path();
        Self::load_layered(global.as_deref(), Some(local.as_path()))
    }

    /// Overlay `other` on top of `self`
    ///
    /// Non-empty scalars replace, a non-empty message list replaces the
    /// whole list, and personas are merged tag by tag.
    pub fn merge(&mut self, other: Config) {
        if !other.api_key.is_empty() {
            self.api_key = other.api_key;
        }
        if !other.model.is_empty() {
            self.model = other.model;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if !other.messages.is_empty() {
            self.messages = other.messages;
        }
        self.system_messages.extend(other.system_messages);
    }

    /// Registry over the configured personas
    pub fn personas(&self) -> StaticPersonaRegistry {
        self.system_messages
            .iter()
            .map(|(tag, message)| (tag.clone(), message.content().to_string()))
            .collect()
    }

    /// Apply command-line overrides, fill in defaults and validate
    pub fn resolve(&self, overrides: &Overrides) -> Result<ResolvedConfig> {
        let api_key = overrides.api_key.as_deref().unwrap_or(&self.api_key);
        let api_key = validate_api_key(api_key)?;

        let model = overrides.model.as_deref().unwrap_or(&self.model).trim();
        let model = if model.is_empty() { DEFAULT_MODEL } else { model };

        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = sanitize_base_url(base_url, "baseUrl")?;

        Ok(ResolvedConfig {
            api_key,
            model: model.to_string(),
            base_url,
        })
    }
}
