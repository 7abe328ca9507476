//! CLI command definitions and handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use insight_core::ai::AnthropicClient;
use insight_core::config::ExtractorConfig;
use insight_core::project::load_project;
use insight_core::project::model::ProjectContext;

pub mod generate;
pub mod process;
pub mod score;
pub mod triage;

/// Insight Extractor - turn raw product insights into scored actions
#[derive(Parser)]
#[command(name = "insight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project context file (.json or .toml) used to bias scoring
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Config file (defaults to ./insight.toml, then ~/.config/insight/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the Anthropic-backed classifier and generator
    #[arg(long, global = true)]
    pub ai: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify an insight: clarity, impact, score and status
    Triage(triage::TriageArgs),

    /// RICE-score a classified insight
    Score(score::ScoreArgs),

    /// Compute a priority score from raw RICE values
    Priority(score::PriorityArgs),

    /// Generate candidate actions for a classified insight
    Generate(generate::GenerateArgs),

    /// Triage an insight and, if it passes, generate and score actions
    Process(process::ProcessArgs),
}

/// Settings shared by every command.
pub struct Session {
    pub config: ExtractorConfig,
    pub project: Option<ProjectContext>,
    pub json: bool,
}

impl Session {
    fn load(cli: &Cli) -> Result<Self> {
        let mut config = ExtractorConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
        if cli.ai {
            config.ai.enabled = true;
        }

        let project = cli.project.as_deref().map(read_project).transpose()?;

        Ok(Self {
            config,
            project,
            json: cli.json,
        })
    }

    pub fn project(&self) -> Option<&ProjectContext> {
        self.project.as_ref()
    }

    pub fn ai_enabled(&self) -> bool {
        self.config.ai.enabled
    }

    /// Shared Anthropic client for the AI-backed components.
    pub fn ai_client(&self) -> Result<Arc<AnthropicClient>> {
        let client = AnthropicClient::from_config(&self.config.ai)?;
        debug!(model = client.model(), "Using Anthropic client");
        Ok(Arc::new(client))
    }
}

fn read_project(path: &Path) -> Result<ProjectContext> {
    load_project(path).with_context(|| format!("Failed to load project file {}", path.display()))
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let session = Session::load(&self)?;

        match self.command {
            Commands::Triage(args) => triage::execute(args, &session).await,
            Commands::Score(args) => score::execute_score(args, &session),
            Commands::Priority(args) => score::execute_priority(args, &session),
            Commands::Generate(args) => generate::execute(args, &session).await,
            Commands::Process(args) => process::execute(args, &session).await,
        }
    }
}

/// Print a serializable value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
