//! Triage result models.

use serde::{Deserialize, Serialize};

use crate::insight::model::{Clarity, Impact, TriageStatus};

/// Outcome of classifying one insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub clarity: Clarity,
    pub impact: Impact,
    pub score: u32,
    pub triage_status: TriageStatus,
    pub explanation: String,
    /// Extra assessment only the AI classifier produces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<TriageDetails>,
}

impl TriageResult {
    /// Build a result whose status follows from clarity and score.
    pub fn new(clarity: Clarity, impact: Impact, score: u32, explanation: impl Into<String>) -> Self {
        Self {
            clarity,
            impact,
            score,
            triage_status: TriageStatus::from_triage(clarity, score),
            explanation: explanation.into(),
            details: None,
        }
    }

    /// The fixed low-confidence result returned when the AI collaborator fails.
    ///
    /// The status is a constant here, not derived from the score.
    pub fn fallback(explanation: impl Into<String>) -> Self {
        Self {
            clarity: Clarity::Vague,
            impact: Impact::NiceToHave,
            score: 2,
            triage_status: TriageStatus::ResearchNeeded,
            explanation: explanation.into(),
            details: Some(TriageDetails::default()),
        }
    }

    pub fn passed(&self) -> bool {
        self.triage_status == TriageStatus::Passed
    }
}

/// Emotional tone of an insight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parse leniently; anything unrecognised is neutral.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Extended AI triage assessment. Scores are on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageDetails {
    pub contextual_relevance: f64,
    pub innovation_potential: f64,
    pub urgency: f64,
    pub user_sentiment: Sentiment,
    pub primary_domain: Option<String>,
    pub affected_features: Vec<String>,
}

impl Default for TriageDetails {
    fn default() -> Self {
        Self {
            contextual_relevance: 50.0,
            innovation_potential: 50.0,
            urgency: 50.0,
            user_sentiment: Sentiment::Neutral,
            primary_domain: Some("General".to_string()),
            affected_features: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_parse_lenient() {
        assert_eq!(Sentiment::parse_lenient("Negative "), Sentiment::Negative);
        assert_eq!(Sentiment::parse_lenient("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::parse_lenient("furious"), Sentiment::Neutral);
        assert_eq!(Sentiment::parse_lenient(""), Sentiment::Neutral);
    }
}
