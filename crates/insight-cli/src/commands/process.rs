//! End-to-end processing command.

use anyhow::Result;
use clap::Args;

use insight_core::action::{ActionGenerator, AiActionGenerator, HeuristicGenerator};
use insight_core::insight::model::{InsightInput, Source};
use insight_core::triage::{AiClassifier, Classifier, HeuristicClassifier};
use insight_core::{InsightPipeline, PipelineOutcome};

use super::{print_json, Session};
use crate::output;

#[derive(Args)]
pub struct ProcessArgs {
    /// Insight text
    pub text: String,

    /// Where the insight came from
    #[arg(short, long, default_value = "user_feedback")]
    pub source: Source,

    /// Seed for template and domain selection
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn execute(args: ProcessArgs, session: &Session) -> Result<()> {
    let input = InsightInput::new(args.text, args.source);

    let outcome = if session.ai_enabled() {
        let client = session.ai_client()?;
        let pipeline = InsightPipeline::new(
            AiClassifier::new(client.clone()).with_max_tokens(session.config.ai.triage_max_tokens),
            AiActionGenerator::new(client).with_max_tokens(session.config.ai.action_max_tokens),
        );
        let spinner = output::spinner("Processing insight...", session.json);
        let outcome = run(&pipeline, input, session).await;
        output::finish(spinner);
        outcome?
    } else {
        let generator = args.seed.map_or_else(HeuristicGenerator::new, HeuristicGenerator::seeded);
        let pipeline = InsightPipeline::new(HeuristicClassifier::new(), generator);
        run(&pipeline, input, session).await?
    };

    if session.json {
        return print_json(&outcome);
    }

    output::print_outcome(&outcome);
    Ok(())
}

async fn run<C: Classifier, G: ActionGenerator>(
    pipeline: &InsightPipeline<C, G>,
    input: InsightInput,
    session: &Session,
) -> Result<PipelineOutcome> {
    Ok(pipeline.process(input, session.project()).await?)
}
