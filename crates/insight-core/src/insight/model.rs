//! Insight domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ExtractorError, ExtractorResult};

/// Minimum triage score for an insight to be worth pursuing.
pub const TRIAGE_PASS_THRESHOLD: u32 = 4;

/// Where an insight came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    UserFeedback,
    TeamObservation,
    AssumptionIdea,
}

impl Source {
    pub const ALL: [Self; 3] = [Self::UserFeedback, Self::TeamObservation, Self::AssumptionIdea];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserFeedback => "user_feedback",
            Self::TeamObservation => "team_observation",
            Self::AssumptionIdea => "assumption_idea",
        }
    }

    /// Triage points contributed by the source.
    pub fn points(&self) -> u32 {
        match self {
            Self::UserFeedback => 3,
            Self::TeamObservation => 2,
            Self::AssumptionIdea => 1,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::UserFeedback => "direct user input",
            Self::TeamObservation => "internal team observation",
            Self::AssumptionIdea => "potential improvement idea",
        }
    }
}

/// How well-articulated an insight is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clarity {
    Clear,
    Vague,
}

impl Clarity {
    pub const ALL: [Self; 2] = [Self::Clear, Self::Vague];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Vague => "vague",
        }
    }

    /// Triage points contributed by clarity.
    pub fn points(&self) -> u32 {
        match self {
            Self::Clear => 2,
            Self::Vague => 1,
        }
    }

    /// Reach/confidence multiplier applied during RICE scoring.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Clear => 1.2,
            Self::Vague => 0.8,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "well-articulated and specific",
            Self::Vague => "requires further clarification",
        }
    }
}

/// How deeply an insight touches the product experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    CoreExperience,
    ImproveExperience,
    NiceToHave,
}

impl Impact {
    pub const ALL: [Self; 3] = [Self::CoreExperience, Self::ImproveExperience, Self::NiceToHave];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoreExperience => "core_experience",
            Self::ImproveExperience => "improve_experience",
            Self::NiceToHave => "nice_to_have",
        }
    }

    /// Numeric level on the 1-3 scale: 3 for core, 1 for nice-to-have.
    ///
    /// Serves as triage points, persisted RICE impact, and base effort.
    pub fn level(&self) -> u8 {
        match self {
            Self::CoreExperience => 3,
            Self::ImproveExperience => 2,
            Self::NiceToHave => 1,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::CoreExperience => "fundamental to user experience",
            Self::ImproveExperience => "can significantly enhance current processes",
            Self::NiceToHave => "optional improvement",
        }
    }
}

/// Triage outcome of an insight.
///
/// ```text
/// pending → passed
///         → research_needed
///         → rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageStatus {
    Pending,
    Passed,
    ResearchNeeded,
    Rejected,
}

impl TriageStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Passed, Self::ResearchNeeded, Self::Rejected];

    /// Derive the status from clarity and triage score.
    ///
    /// Every place that computes a status goes through here.
    pub fn from_triage(clarity: Clarity, score: u32) -> Self {
        match clarity {
            Clarity::Clear if score >= TRIAGE_PASS_THRESHOLD => Self::Passed,
            Clarity::Vague if score >= TRIAGE_PASS_THRESHOLD => Self::ResearchNeeded,
            _ => Self::Rejected,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Passed => "passed",
            Self::ResearchNeeded => "research_needed",
            Self::Rejected => "rejected",
        }
    }

    /// Valid next states from the current state.
    pub fn allowed_next_states(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Passed, Self::ResearchNeeded, Self::Rejected],
            Self::Passed | Self::ResearchNeeded | Self::Rejected => &[],
        }
    }

    /// Check if transition to another status is valid.
    pub fn can_transition_to(&self, to: &Self) -> bool {
        self.allowed_next_states().contains(to)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next_states().is_empty()
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Pending => "Awaiting triage",
            Self::Passed => "Passed triage - high potential value",
            Self::ResearchNeeded => "Needs research - promising but requires more details",
            Self::Rejected => "Rejected - insufficient impact or clarity",
        }
    }
}

fn parse_variant<T: Copy>(
    all: &[T],
    name: fn(&T) -> &'static str,
    kind: &'static str,
    s: &str,
) -> ExtractorResult<T> {
    let wanted = s.trim().to_lowercase().replace('-', "_");
    all.iter()
        .copied()
        .find(|v| name(v) == wanted)
        .ok_or_else(|| ExtractorError::unknown(kind, s))
}

macro_rules! text_enum {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = ExtractorError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_variant(&<$ty>::ALL, <$ty>::as_str, $kind, s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(Source, "source");
text_enum!(Clarity, "clarity");
text_enum!(Impact, "impact");
text_enum!(TriageStatus, "triage status");

/// Raw insight as submitted by a caller, before triage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightInput {
    pub text: String,
    pub source: Source,
}

impl InsightInput {
    pub fn new(text: impl Into<String>, source: Source) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    /// Reject input that must not reach scoring.
    pub fn validate(&self) -> ExtractorResult<()> {
        if self.text.trim().is_empty() {
            return Err(ExtractorError::validation("Insight text is required"));
        }
        Ok(())
    }
}

/// An insight after classification: the inputs downstream scoring reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriagedInsight {
    pub text: String,
    pub source: Source,
    pub clarity: Clarity,
    pub impact: Impact,
}

/// An insight moving through its triage lifecycle.
///
/// Clarity and impact start unset and are written once, by
/// [`Insight::apply_triage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub text: String,
    pub source: Source,
    clarity: Option<Clarity>,
    impact: Option<Impact>,
    triage_score: u32,
    triage_status: TriageStatus,
}

impl Insight {
    /// Create a pending insight.
    pub fn new(input: InsightInput) -> Self {
        Self {
            text: input.text,
            source: input.source,
            clarity: None,
            impact: None,
            triage_score: 0,
            triage_status: TriageStatus::Pending,
        }
    }

    pub fn clarity(&self) -> Option<Clarity> {
        self.clarity
    }

    pub fn impact(&self) -> Option<Impact> {
        self.impact
    }

    pub fn triage_score(&self) -> u32 {
        self.triage_score
    }

    pub fn triage_status(&self) -> TriageStatus {
        self.triage_status
    }

    /// Record a classification. Only a pending insight accepts one.
    pub fn apply_triage(
        &mut self,
        clarity: Clarity,
        impact: Impact,
        score: u32,
        status: TriageStatus,
    ) -> ExtractorResult<()> {
        if !self.triage_status.can_transition_to(&status) {
            return Err(ExtractorError::InvalidStateTransition {
                from: self.triage_status.as_str().to_string(),
                to: status.as_str().to_string(),
            });
        }

        self.clarity = Some(clarity);
        self.impact = Some(impact);
        self.triage_score = score;
        self.triage_status = status;
        Ok(())
    }

    /// View of the classified insight, once triage has run.
    pub fn triaged(&self) -> Option<TriagedInsight> {
        Some(TriagedInsight {
            text: self.text.clone(),
            source: self.source,
            clarity: self.clarity?,
            impact: self.impact?,
        })
    }

    /// Score and status as a storage layer recomputes them on save.
    ///
    /// Returns `None` while the insight is still pending.
    pub fn stored_triage(&self) -> Option<(u32, TriageStatus)> {
        Some(super::stored_triage(self.source, self.clarity?, self.impact?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_rule() {
        assert_eq!(TriageStatus::from_triage(Clarity::Clear, 4), TriageStatus::Passed);
        assert_eq!(TriageStatus::from_triage(Clarity::Clear, 3), TriageStatus::Rejected);
        assert_eq!(TriageStatus::from_triage(Clarity::Vague, 5), TriageStatus::ResearchNeeded);
        assert_eq!(TriageStatus::from_triage(Clarity::Vague, 3), TriageStatus::Rejected);
        assert_eq!(TriageStatus::from_triage(Clarity::Clear, 0), TriageStatus::Rejected);
    }

    #[test]
    fn test_status_rule_exhaustive() {
        for clarity in Clarity::ALL {
            for score in 0..=12 {
                let status = TriageStatus::from_triage(clarity, score);
                let expected = match (clarity, score >= 4) {
                    (Clarity::Clear, true) => TriageStatus::Passed,
                    (Clarity::Vague, true) => TriageStatus::ResearchNeeded,
                    _ => TriageStatus::Rejected,
                };
                assert_eq!(status, expected, "clarity={clarity} score={score}");
            }
        }
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("user_feedback".parse::<Source>().unwrap(), Source::UserFeedback);
        assert_eq!("Team-Observation".parse::<Source>().unwrap(), Source::TeamObservation);
        assert_eq!("nice_to_have".parse::<Impact>().unwrap(), Impact::NiceToHave);
        assert_eq!("research_needed".parse::<TriageStatus>().unwrap(), TriageStatus::ResearchNeeded);
        assert!("rumour".parse::<Source>().is_err());
        assert!("".parse::<Clarity>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Impact::CoreExperience).unwrap();
        assert_eq!(json, "\"core_experience\"");
        let source: Source = serde_json::from_str("\"assumption_idea\"").unwrap();
        assert_eq!(source, Source::AssumptionIdea);
    }

    #[test]
    fn test_lifecycle_transitions() {
        assert!(TriageStatus::Pending.can_transition_to(&TriageStatus::Passed));
        assert!(TriageStatus::Pending.can_transition_to(&TriageStatus::Rejected));
        assert!(!TriageStatus::Passed.can_transition_to(&TriageStatus::Pending));
        assert!(!TriageStatus::Rejected.can_transition_to(&TriageStatus::Passed));
        assert!(TriageStatus::ResearchNeeded.is_terminal());
        assert!(!TriageStatus::Pending.is_terminal());
    }

    #[test]
    fn test_apply_triage_once() {
        let mut insight = Insight::new(InsightInput::new("Checkout is slow", Source::UserFeedback));
        assert!(insight.triaged().is_none());
        assert!(insight.stored_triage().is_none());

        insight
            .apply_triage(Clarity::Vague, Impact::ImproveExperience, 6, TriageStatus::ResearchNeeded)
            .unwrap();
        assert_eq!(insight.clarity(), Some(Clarity::Vague));
        assert_eq!(insight.triage_status(), TriageStatus::ResearchNeeded);

        let err = insight
            .apply_triage(Clarity::Clear, Impact::CoreExperience, 8, TriageStatus::Passed)
            .unwrap_err();
        assert!(matches!(err, ExtractorError::InvalidStateTransition { .. }));
        assert_eq!(insight.clarity(), Some(Clarity::Vague));
    }

    #[test]
    fn test_validate_input() {
        assert!(InsightInput::new("   \n\t", Source::UserFeedback).validate().is_err());
        assert!(InsightInput::new("", Source::AssumptionIdea).validate().is_err());
        assert!(InsightInput::new("Search is hard to find", Source::TeamObservation).validate().is_ok());
    }
}
