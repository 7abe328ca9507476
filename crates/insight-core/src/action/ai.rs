//! Action generation through an external language model.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::model::{ActionGenerationResult, CandidateAction};
use super::ActionGenerator;
use crate::ai::{prompt, CompletionService};
use crate::insight::model::TriagedInsight;
use crate::project::model::ProjectContext;
use crate::rice::model::CandidateRice;

const DEFAULT_REACH: f64 = 50.0;
const DEFAULT_IMPACT: f64 = 5.0;
const DEFAULT_CONFIDENCE: f64 = 70.0;
const DEFAULT_EFFORT: f64 = 3.0;
const DEFAULT_PRIORITY: u8 = 5;

/// How much of an unparsable reply is kept in the fallback reasoning.
const REPLY_EXCERPT_CHARS: usize = 500;

/// Action generator backed by a [`CompletionService`].
pub struct AiActionGenerator<C> {
    completion: C,
    max_tokens: u32,
}

impl<C: CompletionService> AiActionGenerator<C> {
    pub fn new(completion: C) -> Self {
        Self {
            completion,
            max_tokens: 2000,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl<C: CompletionService> ActionGenerator for AiActionGenerator<C> {
    async fn generate(
        &self,
        insight: &TriagedInsight,
        triage_score: u32,
        project: Option<&ProjectContext>,
    ) -> ActionGenerationResult {
        let prompt = match prompt::action_prompt(insight, triage_score, project) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Failed to render action prompt");
                return error_fallback();
            }
        };

        let reply = match self.completion.complete(&prompt, self.max_tokens).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "AI action generation failed, using fallback");
                return error_fallback();
            }
        };

        match parse_action_reply(&reply) {
            Some(result) => {
                debug!(actions = result.actions.len(), "AI actions parsed");
                result
            }
            None => {
                warn!("Failed to parse AI action reply, using fallback");
                parse_fallback(&reply)
            }
        }
    }
}

/// Parse a model reply, trying the raw text, then the text with code fences
/// stripped, then the span from the first `{` to the last `}`.
///
/// Returns `None` when no strategy yields an object with a non-empty
/// `actions` array.
pub fn parse_action_reply(reply: &str) -> Option<ActionGenerationResult> {
    let trimmed = reply.trim();
    let strategies = [Some(trimmed.to_string()), Some(strip_fences(trimmed)), outer_braces(trimmed)];

    strategies
        .into_iter()
        .flatten()
        .filter_map(|text| serde_json::from_str::<Value>(&text).ok())
        .find_map(|value| normalize_generation(&value))
}

fn strip_fences(text: &str) -> String {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.trim_end().strip_suffix("```").unwrap_or(text).trim().to_string()
}

fn outer_braces(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| text[start..=end].to_string())
}

fn normalize_generation(value: &Value) -> Option<ActionGenerationResult> {
    let actions = value.get("actions")?.as_array()?;
    if actions.is_empty() {
        return None;
    }

    Some(ActionGenerationResult {
        actions: actions.iter().map(normalize_action).collect(),
        category_area: None,
        full_reasoning: non_empty_str(value.get("fullReasoning"))
            .unwrap_or("No detailed reasoning provided")
            .to_string(),
        key_insights: string_list(value.get("keyInsights")),
        potential_challenges: string_list(value.get("potentialChallenges")),
    })
}

/// Default each field of one action independently.
fn normalize_action(action: &Value) -> CandidateAction {
    let rice = action.get("riceScoring");
    let number = |key: &str| {
        rice.and_then(|r| r.get(key))
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite())
    };
    let percent = |key: &str, default: f64| number(key).map_or(default, |n| n.clamp(0.0, 100.0));
    let scale = |key: &str, default: f64| number(key).filter(|n| *n > 0.0).unwrap_or(default);

    let priority = action
        .get("priority")
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n > 0.0)
        .map_or(DEFAULT_PRIORITY, |n| n.round().min(10.0) as u8);

    CandidateAction {
        domain: non_empty_str(action.get("domain")).unwrap_or("Unspecified").to_string(),
        description: non_empty_str(action.get("description"))
            .unwrap_or("No description provided")
            .to_string(),
        rationale: non_empty_str(action.get("rationale"))
            .unwrap_or("No rationale provided")
            .to_string(),
        rice_scoring: CandidateRice::new(
            percent("reach", DEFAULT_REACH),
            scale("impact", DEFAULT_IMPACT),
            percent("confidence", DEFAULT_CONFIDENCE),
            scale("effort", DEFAULT_EFFORT),
        ),
        priority,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

/// Result returned when the reply could not be parsed.
pub fn parse_fallback(reply: &str) -> ActionGenerationResult {
    let excerpt: String = reply.chars().take(REPLY_EXCERPT_CHARS).collect();
    ActionGenerationResult {
        actions: vec![CandidateAction {
            domain: "General Analysis".to_string(),
            description: "Comprehensive review needed".to_string(),
            rationale: "Unable to parse detailed AI response".to_string(),
            rice_scoring: CandidateRice {
                reach: 50.0,
                impact: 5.0,
                confidence: 50.0,
                effort: 3.0,
                priority_score: 4,
            },
            priority: 4,
        }],
        category_area: None,
        full_reasoning: format!("Original response could not be parsed: {}...", excerpt),
        key_insights: vec!["Parsing required manual review".to_string()],
        potential_challenges: vec!["Complex response structure".to_string()],
    }
}

/// Result returned when the AI service could not be reached.
pub fn error_fallback() -> ActionGenerationResult {
    ActionGenerationResult {
        actions: vec![CandidateAction {
            domain: "Product UX".to_string(),
            description: "Investigate and improve feature based on user feedback".to_string(),
            rationale: "Error in AI action generation".to_string(),
            rice_scoring: CandidateRice {
                reach: 50.0,
                impact: 5.0,
                confidence: 70.0,
                effort: 3.0,
                priority_score: 5,
            },
            priority: 5,
        }],
        category_area: None,
        full_reasoning: "Unable to generate detailed actions due to an error".to_string(),
        key_insights: vec!["Action generation failed".to_string()],
        potential_challenges: vec!["Technical issue with AI service".to_string()],
    }
}
