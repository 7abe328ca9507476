//! Triage through an external language model.
//!
//! Whatever goes wrong (prompt rendering, transport, an unparsable reply)
//! the classifier answers with [`TriageResult::fallback`].

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::model::{Sentiment, TriageDetails, TriageResult};
use super::Classifier;
use crate::ai::{extract_json, prompt, CompletionService};
use crate::insight::model::{Clarity, Impact, Source};
use crate::project::model::ProjectContext;

/// Classifier backed by a [`CompletionService`].
pub struct AiClassifier<C> {
    completion: C,
    max_tokens: u32,
}

impl<C: CompletionService> AiClassifier<C> {
    pub fn new(completion: C) -> Self {
        Self {
            completion,
            max_tokens: 1000,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl<C: CompletionService> Classifier for AiClassifier<C> {
    async fn classify(&self, text: &str, source: Source, project: Option<&ProjectContext>) -> TriageResult {
        let prompt = match prompt::triage_prompt(text, source, project) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Failed to render triage prompt");
                return TriageResult::fallback(format!("Error in AI triage assessment: {}", e));
            }
        };

        let reply = match self.completion.complete(&prompt, self.max_tokens).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "AI triage request failed, using fallback");
                return TriageResult::fallback(format!("Error in AI triage assessment: {}", e));
            }
        };

        match parse_triage_reply(&reply) {
            Some(result) => {
                debug!(score = result.score, status = %result.triage_status, "AI triage parsed");
                result
            }
            None => {
                warn!(reply = %reply, "Failed to parse AI triage reply, using fallback");
                TriageResult::fallback("Unable to parse detailed AI assessment")
            }
        }
    }
}

/// Parse a model reply into a triage result.
///
/// Returns `None` only when the reply holds no JSON object. Missing or
/// malformed fields are defaulted one by one, and the status is always
/// recomputed from clarity and score.
pub fn parse_triage_reply(reply: &str) -> Option<TriageResult> {
    let value: Value = serde_json::from_str(&extract_json(reply)).ok()?;
    let obj = value.as_object()?;

    let text = |key: &str| obj.get(key).and_then(Value::as_str);
    let number = |key: &str| obj.get(key).and_then(Value::as_f64).filter(|n| n.is_finite());
    let percent = |key: &str| number(key).map_or(50.0, |n| n.clamp(0.0, 100.0));

    let clarity = text("clarity")
        .and_then(|s| s.parse().ok())
        .unwrap_or(Clarity::Vague);
    let impact = text("impact")
        .and_then(|s| s.parse().ok())
        .unwrap_or(Impact::NiceToHave);
    let score = number("score").map_or(2, |n| n.round().max(0.0) as u32);
    let explanation = text("explanation")
        .or_else(|| text("reasoning"))
        .unwrap_or("No explanation provided");

    let details = TriageDetails {
        contextual_relevance: percent("contextualRelevance"),
        innovation_potential: percent("innovationPotential"),
        urgency: percent("urgency"),
        user_sentiment: text("userSentiment").map(Sentiment::parse_lenient).unwrap_or_default(),
        primary_domain: text("primaryDomain").map(str::to_string),
        affected_features: obj
            .get("affectedFeatures")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    };

    let mut result = TriageResult::new(clarity, impact, score, explanation);
    result.details = Some(details);
    Some(result)
}
