//! Deterministic keyword/length triage.

use async_trait::async_trait;
use tracing::debug;

use super::model::TriageResult;
use super::Classifier;
use crate::insight::model::{Clarity, Impact, Source, TriageStatus};
use crate::project::model::ProjectContext;
use crate::project::{assess_alignment, mentions_context};

const CORE_EXPERIENCE_KEYWORDS: &[&str] =
    &["fundamental", "critical", "essential", "core", "primary", "main"];

const IMPROVE_EXPERIENCE_KEYWORDS: &[&str] =
    &["enhance", "improve", "optimize", "refine", "better", "smoother"];

/// Classifier that needs no external service.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify synchronously. Identical input always yields identical output.
    pub fn evaluate(&self, text: &str, source: Source, project: Option<&ProjectContext>) -> TriageResult {
        let clarity = clarity_of(text);
        let impact = impact_of(text, source, project);
        let score = triage_score(clarity, impact, source, project);
        let status = TriageStatus::from_triage(clarity, score);

        debug!(
            source = %source,
            clarity = %clarity,
            impact = %impact,
            score,
            status = %status,
            "Heuristic triage"
        );

        let explanation = explain(text, source, clarity, impact, score, status, project);
        TriageResult::new(clarity, impact, score, explanation)
    }
}

#[async_trait]
impl Classifier for HeuristicClassifier {
    async fn classify(&self, text: &str, source: Source, project: Option<&ProjectContext>) -> TriageResult {
        self.evaluate(text, source, project)
    }
}

/// Clear when the trimmed text has more than 10 words and more than 50 characters.
pub fn clarity_of(text: &str) -> Clarity {
    let trimmed = text.trim();
    let word_count = trimmed.split_whitespace().count();
    let text_length = trimmed.chars().count();

    if word_count > 10 && text_length > 50 {
        Clarity::Clear
    } else {
        Clarity::Vague
    }
}

/// Keyword rule for impact at triage time.
///
/// A project context word in the text wins outright; otherwise the source
/// decides which keyword list applies.
pub fn impact_of(text: &str, source: Source, project: Option<&ProjectContext>) -> Impact {
    if project.is_some_and(|p| mentions_context(p, text)) {
        return Impact::CoreExperience;
    }

    let lowered = text.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    match source {
        Source::UserFeedback if mentions(CORE_EXPERIENCE_KEYWORDS) => Impact::CoreExperience,
        Source::UserFeedback => Impact::ImproveExperience,
        Source::TeamObservation if mentions(IMPROVE_EXPERIENCE_KEYWORDS) => Impact::ImproveExperience,
        Source::TeamObservation | Source::AssumptionIdea => Impact::NiceToHave,
    }
}

/// Clarity, impact and source points plus up to two project bonus points.
pub fn triage_score(clarity: Clarity, impact: Impact, source: Source, project: Option<&ProjectContext>) -> u32 {
    let mut score = clarity.points() + u32::from(impact.level()) + source.points();

    if let Some(project) = project {
        if project.has_business_objectives() {
            score += 1;
        }
        if project.has_core_features() || project.has_north_star() {
            score += 1;
        }
    }

    score
}

fn explain(
    text: &str,
    source: Source,
    clarity: Clarity,
    impact: Impact,
    score: u32,
    status: TriageStatus,
    project: Option<&ProjectContext>,
) -> String {
    let mut out = String::from("Insight Analysis:\n");
    out.push_str(&format!("- Source: {}\n", source.description()));
    out.push_str(&format!("- Clarity: {}\n", clarity.description()));
    out.push_str(&format!("- Impact: {}\n", impact.description()));
    out.push_str(&format!("- Triage Score: {}\n", score));
    out.push_str(&format!("- Status: {}\n", status.description()));

    if let Some(p) = project {
        out.push_str("\nProject Context:\n");
        out.push_str(&format!("- Name: {}\n", p.name));
        out.push_str(&format!(
            "- Value Proposition: {}\n",
            p.value_proposition().unwrap_or("Not specified")
        ));
        out.push_str(&format!(
            "- North Star Objective: {}\n",
            p.north_star().unwrap_or("Not specified")
        ));
        out.push_str(&format!("- Alignment: {}\n", assess_alignment(p, text).as_str()));
    }

    out.push_str(&format!("\nRecommendation: {}", recommendation(status, project)));
    out
}

fn recommendation(status: TriageStatus, project: Option<&ProjectContext>) -> String {
    match (status, project) {
        (TriageStatus::Passed, Some(p)) => {
            format!("Proceed with detailed analysis aligned with project \"{}\".", p.name)
        }
        (TriageStatus::Passed, None) => {
            "Proceed with detailed analysis and potential implementation.".to_string()
        }
        (TriageStatus::ResearchNeeded, Some(p)) => format!(
            "Gather more context specific to project \"{}\" before making a decision.",
            p.name
        ),
        (TriageStatus::ResearchNeeded, None) => {
            "Gather more context and details before making a decision.".to_string()
        }
        _ => "Consider refining the insight or exploring alternative approaches.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKOUT: &str =
        "Users report the checkout button is fundamental to completing purchases and it's broken on mobile";

    fn project() -> ProjectContext {
        ProjectContext {
            name: "Nestling".to_string(),
            north_star_objective: Some("Weekly active parents".to_string()),
            core_features: vec!["Sleep tracker".to_string()],
            current_business_objectives: vec!["Grow retention".to_string()],
            ..ProjectContext::default()
        }
    }

    #[test]
    fn test_checkout_scenario() {
        let result = HeuristicClassifier.evaluate(CHECKOUT, Source::UserFeedback, None);
        assert_eq!(result.clarity, Clarity::Clear);
        assert_eq!(result.impact, Impact::CoreExperience);
        assert_eq!(result.score, 8);
        assert_eq!(result.triage_status, TriageStatus::Passed);
        assert!(result.details.is_none());
        assert!(result.explanation.contains("- Triage Score: 8"));
        assert!(result.explanation.contains("Proceed with detailed analysis and potential implementation."));
    }

    #[test]
    fn test_deterministic() {
        let p = project();
        let first = HeuristicClassifier.evaluate(CHECKOUT, Source::TeamObservation, Some(&p));
        let second = HeuristicClassifier.evaluate(CHECKOUT, Source::TeamObservation, Some(&p));
        assert_eq!(first, second);
    }

    #[test]
    fn test_clarity_thresholds() {
        // 11 words but only 21 characters
        assert_eq!(clarity_of("a b c d e f g h i j k"), Clarity::Vague);
        // long but few words
        assert_eq!(clarity_of(&"x".repeat(80)), Clarity::Vague);
        assert_eq!(clarity_of(CHECKOUT), Clarity::Clear);
    }

    #[test]
    fn test_empty_text_is_vague() {
        assert_eq!(clarity_of(""), Clarity::Vague);
        assert_eq!(clarity_of("   \t\n "), Clarity::Vague);

        let result = HeuristicClassifier.evaluate("   ", Source::AssumptionIdea, None);
        assert_eq!(result.clarity, Clarity::Vague);
        assert_eq!(result.impact, Impact::NiceToHave);
        assert_eq!(result.score, 3);
        assert_eq!(result.triage_status, TriageStatus::Rejected);
    }

    #[test]
    fn test_impact_by_source() {
        assert_eq!(impact_of("The main menu is hidden", Source::UserFeedback, None), Impact::CoreExperience);
        assert_eq!(impact_of("Colors look dated", Source::UserFeedback, None), Impact::ImproveExperience);
        assert_eq!(impact_of("We could optimize search", Source::TeamObservation, None), Impact::ImproveExperience);
        assert_eq!(impact_of("Footer links are odd", Source::TeamObservation, None), Impact::NiceToHave);
        assert_eq!(impact_of("A critical core idea", Source::AssumptionIdea, None), Impact::NiceToHave);
    }

    #[test]
    fn test_project_words_force_core_impact() {
        let p = project();
        assert_eq!(
            impact_of("The sleep chart never loads", Source::AssumptionIdea, Some(&p)),
            Impact::CoreExperience
        );
        assert_eq!(
            impact_of("Footer links are odd", Source::TeamObservation, Some(&p)),
            Impact::NiceToHave
        );
    }

    #[test]
    fn test_project_bonus_points() {
        let p = project();
        assert_eq!(triage_score(Clarity::Vague, Impact::NiceToHave, Source::AssumptionIdea, None), 3);
        assert_eq!(triage_score(Clarity::Vague, Impact::NiceToHave, Source::AssumptionIdea, Some(&p)), 5);

        let mut only_objectives = ProjectContext::new("Bare");
        only_objectives.current_business_objectives = vec!["Revenue".to_string()];
        assert_eq!(
            triage_score(Clarity::Vague, Impact::NiceToHave, Source::AssumptionIdea, Some(&only_objectives)),
            4
        );
        assert_eq!(
            triage_score(Clarity::Vague, Impact::NiceToHave, Source::AssumptionIdea, Some(&ProjectContext::new("Bare"))),
            3
        );
    }

    #[test]
    fn test_vague_with_project_needs_research() {
        let p = project();
        let result = HeuristicClassifier.evaluate("Footer links odd", Source::TeamObservation, Some(&p));
        assert_eq!(result.clarity, Clarity::Vague);
        // 1 clarity + 1 impact + 2 source + 2 project bonus
        assert_eq!(result.score, 6);
        assert_eq!(result.triage_status, TriageStatus::ResearchNeeded);
        assert!(result.explanation.contains("- Name: Nestling"));
        assert!(result.explanation.contains("- Alignment: Limited Alignment"));
        assert!(result.explanation.contains("Gather more context specific to project \"Nestling\""));
    }
}
