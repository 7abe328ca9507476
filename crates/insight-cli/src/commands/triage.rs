//! Triage command.

use anyhow::Result;
use clap::Args;

use insight_core::insight::model::{InsightInput, Source};
use insight_core::triage::{AiClassifier, Classifier, HeuristicClassifier};

use super::{print_json, Session};
use crate::output;

#[derive(Args)]
pub struct TriageArgs {
    /// Insight text
    pub text: String,

    /// Where the insight came from
    #[arg(short, long, default_value = "user_feedback")]
    pub source: Source,
}

pub async fn execute(args: TriageArgs, session: &Session) -> Result<()> {
    InsightInput::new(args.text.as_str(), args.source).validate()?;

    let result = if session.ai_enabled() {
        let classifier =
            AiClassifier::new(session.ai_client()?).with_max_tokens(session.config.ai.triage_max_tokens);
        let spinner = output::spinner("Asking the model for a triage assessment...", session.json);
        let result = classifier.classify(&args.text, args.source, session.project()).await;
        output::finish(spinner);
        result
    } else {
        HeuristicClassifier::new().evaluate(&args.text, args.source, session.project())
    };

    if session.json {
        return print_json(&result);
    }

    output::print_triage(&result);
    Ok(())
}
