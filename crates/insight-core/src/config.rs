//! Extractor configuration.
//!
//! Sources, highest precedence first:
//! 1. Environment variables (`ANTHROPIC_API_KEY`, `INSIGHT_AI_*`)
//! 2. An explicit config file, or `./insight.toml`
//! 3. `~/.config/insight/config.toml`
//! 4. Built-in defaults
//!
//! Every layer is merged, so a local file only overrides the keys it sets.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::ai::anthropic::ANTHROPIC_API_URL;
use crate::error::{ExtractorError, ExtractorResult};

pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "insight.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub ai: AiConfig,
}

/// Settings for the optional AI collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Use the AI classifier and generator instead of the heuristics.
    pub enabled: bool,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub triage_max_tokens: u32,
    pub action_max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_url: ANTHROPIC_API_URL.to_string(),
            triage_max_tokens: 1000,
            action_max_tokens: 2000,
            timeout_secs: 120,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from every source.
    ///
    /// An explicit file must exist; the implicit files are optional.
    pub fn load(explicit: Option<&Path>) -> ExtractorResult<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ExtractorError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(Self::figment(explicit).extract()?)
    }

    /// Build the provider chain, lowest precedence first.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "Merging global config");
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
        if local_path.exists() {
            debug!(path = %local_path.display(), "Merging local config");
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(
                Env::prefixed("INSIGHT_AI_")
                    .map(|key| format!("ai.{}", key.as_str().to_ascii_lowercase()).into()),
            )
            .merge(Env::raw().only(&["ANTHROPIC_API_KEY"]).map(|_| "ai.api_key".into()))
    }

    /// `~/.config/insight/config.toml`, when a config dir exists.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("insight").join("config.toml"))
    }
}
