//! Candidate and persisted action models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExtractorError, ExtractorResult};
use crate::rice::model::{CandidateRice, RiceInputs, RiceScore};
use crate::rice::persisted_priority;

/// Longest description an [`Action`] accepts, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// One proposed action, scored on the 1-10 candidate scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateAction {
    pub domain: String,
    pub description: String,
    pub rationale: String,
    pub rice_scoring: CandidateRice,
    /// 0-10.
    pub priority: u8,
}

/// Everything an action generator produces for one insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGenerationResult {
    /// Never empty.
    pub actions: Vec<CandidateAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_area: Option<String>,
    pub full_reasoning: String,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub potential_challenges: Vec<String>,
}

impl ActionGenerationResult {
    pub fn analysis(&self) -> AiAnalysis {
        AiAnalysis {
            full_reasoning: self.full_reasoning.clone(),
            key_insights: self.key_insights.clone(),
            potential_challenges: self.potential_challenges.clone(),
        }
    }
}

/// Reasoning attached to a generated action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub full_reasoning: String,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub potential_challenges: Vec<String>,
}

/// Action status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Proposed,
    InProgress,
    Completed,
    Rejected,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> ExtractorResult<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "proposed" => Ok(Self::Proposed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ExtractorError::unknown("action status", s)),
        }
    }
}

/// Who produced an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedBy {
    #[default]
    Ai,
    Human,
}

impl GeneratedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Human => "human",
        }
    }
}

/// An action in its persisted shape, RICE fields on the 1-3 scale.
///
/// The stored `priority_score` is refreshed on every change made through
/// this type, but readers should call [`Action::priority_score`], which
/// recomputes from the current fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub description: String,
    pub reach: f64,
    pub impact: u8,
    pub confidence: f64,
    pub effort: u8,
    priority_score: u32,
    pub status: ActionStatus,
    pub generated_by: GeneratedBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of an [`Action`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionUpdate {
    pub description: Option<String>,
    pub reach: Option<f64>,
    pub impact: Option<f64>,
    pub confidence: Option<f64>,
    pub effort: Option<f64>,
    pub status: Option<ActionStatus>,
    pub category_area: Option<String>,
}

impl Action {
    /// Create a proposed action from already-persisted RICE values.
    pub fn new(description: impl Into<String>, rice: RiceInputs, generated_by: GeneratedBy) -> ExtractorResult<Self> {
        let description = validate_description(description.into())?;
        let now = Utc::now();
        let mut action = Self {
            description,
            reach: 0.0,
            impact: 1,
            confidence: 0.0,
            effort: 1,
            priority_score: 0,
            status: ActionStatus::Proposed,
            generated_by,
            category_area: None,
            ai_analysis: None,
            created_at: now,
            updated_at: now,
        };
        action.set_rice(rice.normalize());
        Ok(action)
    }

    /// Map a candidate onto the persisted scale.
    ///
    /// Impact and effort go through the 1-10 to 1-3 down-mappings and the
    /// priority score is recomputed with the persisted formula. Descriptions
    /// longer than [`MAX_DESCRIPTION_CHARS`] are truncated.
    pub fn from_candidate(candidate: &CandidateAction, generated_by: GeneratedBy) -> Self {
        let mut description: String = candidate
            .description
            .trim()
            .chars()
            .take(MAX_DESCRIPTION_CHARS)
            .collect();
        if description.is_empty() {
            description = "AI-generated action".to_string();
        }

        let rice = &candidate.rice_scoring;
        let now = Utc::now();
        let mut action = Self {
            description,
            reach: 0.0,
            impact: 1,
            confidence: 0.0,
            effort: 1,
            priority_score: 0,
            status: ActionStatus::Proposed,
            generated_by,
            category_area: Some(candidate.domain.clone()),
            ai_analysis: None,
            created_at: now,
            updated_at: now,
        };
        action.set_rice(rice.to_persisted());
        action
    }

    pub fn with_category_area(mut self, category_area: impl Into<String>) -> Self {
        self.category_area = Some(category_area.into());
        self
    }

    pub fn with_analysis(mut self, analysis: AiAnalysis) -> Self {
        self.ai_analysis = Some(analysis);
        self
    }

    /// Priority score recomputed from the current RICE fields.
    pub fn priority_score(&self) -> u32 {
        persisted_priority(self.reach, self.impact, self.confidence, self.effort)
    }

    /// Current RICE fields with a freshly computed priority score.
    pub fn rice(&self) -> RiceScore {
        RiceScore {
            reach: self.reach,
            impact: self.impact,
            confidence: self.confidence,
            effort: self.effort,
            priority_score: self.priority_score(),
        }
    }

    /// Apply a partial update. RICE fields are clamped and the priority
    /// score is recomputed whether or not any of them changed.
    pub fn apply(&mut self, update: ActionUpdate) -> ExtractorResult<()> {
        if let Some(description) = update.description {
            self.description = validate_description(description)?;
        }

        let rice = RiceInputs {
            reach: update.reach.or(Some(self.reach)),
            impact: update.impact.or(Some(f64::from(self.impact))),
            confidence: update.confidence.or(Some(self.confidence)),
            effort: update.effort.or(Some(f64::from(self.effort))),
        };
        self.set_rice(rice.normalize());

        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(category_area) = update.category_area {
            self.category_area = Some(category_area.trim().to_string());
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    fn set_rice(&mut self, rice: RiceScore) {
        self.reach = rice.reach;
        self.impact = rice.impact;
        self.confidence = rice.confidence;
        self.effort = rice.effort;
        self.priority_score = rice.priority_score;
    }
}

fn validate_description(description: String) -> ExtractorResult<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ExtractorError::validation("Action description is required"));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ExtractorError::validation(format!(
            "Action description cannot exceed {} characters",
            MAX_DESCRIPTION_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(impact: f64, effort: f64) -> CandidateAction {
        CandidateAction {
            domain: "technology".to_string(),
            description: "Improve project system performance and scalability".to_string(),
            rationale: "Matched technology keywords".to_string(),
            rice_scoring: CandidateRice::new(80.0, impact, 90.0, effort),
            priority: 7,
        }
    }

    #[test]
    fn test_from_candidate_maps_scale() {
        let action = Action::from_candidate(&candidate(9.0, 6.0), GeneratedBy::Ai);
        assert_eq!(action.impact, 3);
        assert_eq!(action.effort, 2);
        assert_eq!(action.reach, 80.0);
        assert_eq!(action.confidence, 90.0);
        // 80 * 90 * 0.9 / 60 = 108, clamped
        assert_eq!(action.priority_score(), 100);
        assert_eq!(action.status, ActionStatus::Proposed);
        assert_eq!(action.category_area.as_deref(), Some("technology"));
    }

    #[test]
    fn test_from_candidate_truncates_long_description() {
        let mut long = candidate(5.0, 3.0);
        long.description = "a".repeat(900);
        let action = Action::from_candidate(&long, GeneratedBy::Ai);
        assert_eq!(action.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_apply_recomputes_priority() {
        let mut action = Action::new("Fix checkout", RiceInputs::default(), GeneratedBy::Human).unwrap();
        assert_eq!(action.priority_score(), 35);

        action
            .apply(ActionUpdate {
                reach: Some(90.0),
                impact: Some(3.0),
                confidence: Some(150.0),
                ..ActionUpdate::default()
            })
            .unwrap();
        assert_eq!(action.confidence, 100.0);
        // 90 * 90 * 1.0 / 30
        assert_eq!(action.priority_score(), 100);
        assert_eq!(action.rice().priority_score, 100);

        action
            .apply(ActionUpdate {
                effort: Some(3.0),
                status: Some(ActionStatus::InProgress),
                ..ActionUpdate::default()
            })
            .unwrap();
        assert_eq!(action.priority_score(), 90);
        assert_eq!(action.status, ActionStatus::InProgress);
    }

    #[test]
    fn test_priority_not_trusted_from_storage() {
        let action = Action::new("Fix checkout", RiceInputs::default(), GeneratedBy::Human).unwrap();
        let mut json = serde_json::to_value(&action).unwrap();
        json["priorityScore"] = serde_json::json!(99);
        json["reach"] = serde_json::json!(20);

        let loaded: Action = serde_json::from_value(json).unwrap();
        // 20 * 30 * 0.7 / 30
        assert_eq!(loaded.priority_score(), 14);
    }

    #[test]
    fn test_description_rules() {
        assert!(Action::new("   ", RiceInputs::default(), GeneratedBy::Human).is_err());
        assert!(Action::new("x".repeat(501), RiceInputs::default(), GeneratedBy::Human).is_err());

        let mut action = Action::new("  Trim me  ", RiceInputs::default(), GeneratedBy::Human).unwrap();
        assert_eq!(action.description, "Trim me");
        let err = action
            .apply(ActionUpdate {
                description: Some(String::new()),
                ..ActionUpdate::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("description"));
        assert_eq!(action.description, "Trim me");
    }

    #[test]
    fn test_status_names() {
        assert_eq!(ActionStatus::parse("in-progress").unwrap(), ActionStatus::InProgress);
        assert!(ActionStatus::parse("done").is_err());
        assert_eq!(
            serde_json::to_string(&GeneratedBy::Human).unwrap(),
            "\"human\""
        );
    }
}
