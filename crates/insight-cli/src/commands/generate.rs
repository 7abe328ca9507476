//! Action generation command.

use anyhow::Result;
use clap::Args;

use insight_core::action::{join_descriptions, ActionGenerator, AiActionGenerator, HeuristicGenerator};
use insight_core::insight::model::{Clarity, Impact, InsightInput, Source, TriagedInsight};

use super::{print_json, Session};
use crate::output;

#[derive(Args)]
pub struct GenerateArgs {
    /// Insight text
    pub text: String,

    /// Where the insight came from
    #[arg(short, long, default_value = "user_feedback")]
    pub source: Source,

    /// Impact category from triage
    #[arg(short, long, default_value = "improve_experience")]
    pub impact: Impact,

    /// Clarity from triage
    #[arg(long, default_value = "clear")]
    pub clarity: Clarity,

    /// Triage score passed to the model
    #[arg(long, default_value = "4")]
    pub score: u32,

    /// Seed for template and domain selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print only the descriptions joined by "; "
    #[arg(long)]
    pub joined: bool,
}

pub async fn execute(args: GenerateArgs, session: &Session) -> Result<()> {
    InsightInput::new(args.text.as_str(), args.source).validate()?;

    let insight = TriagedInsight {
        text: args.text,
        source: args.source,
        clarity: args.clarity,
        impact: args.impact,
    };

    let result = if session.ai_enabled() {
        let generator =
            AiActionGenerator::new(session.ai_client()?).with_max_tokens(session.config.ai.action_max_tokens);
        let spinner = output::spinner("Generating actions...", session.json);
        let result = generator.generate(&insight, args.score, session.project()).await;
        output::finish(spinner);
        result
    } else {
        let generator = args.seed.map_or_else(HeuristicGenerator::new, HeuristicGenerator::seeded);
        generator.generate(&insight, args.score, session.project()).await
    };

    if args.joined {
        println!("{}", join_descriptions(&result.actions));
        return Ok(());
    }

    if session.json {
        return print_json(&result);
    }

    output::print_generation(&result);
    Ok(())
}
