//! RICE action scoring: reach, impact, confidence and effort folded into a
//! single priority score.
//!
//! Persisted formula (1-3 scale):
//! `reach * (impact * 30) * (confidence / 100) / (effort * 30)`, clamped to 0-100.
//!
//! Candidate formula (1-10 scale):
//! `reach * impact * confidence / (effort * 100)`.

pub mod model;

use tracing::debug;

use crate::insight::model::{Clarity, Impact, Source};
use crate::project::model::ProjectContext;
use model::{CandidateRice, RiceInputs, RiceScore};

pub const DEFAULT_REACH: f64 = 50.0;
pub const DEFAULT_IMPACT: u8 = 1;
pub const DEFAULT_CONFIDENCE: f64 = 70.0;
pub const DEFAULT_EFFORT: u8 = 1;

/// Scores classified insights on the persisted 1-3 scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiceScorer;

impl RiceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compute every RICE field for a classified insight.
    pub fn score(
        &self,
        impact: Impact,
        source: Source,
        clarity: Clarity,
        project: Option<&ProjectContext>,
    ) -> RiceScore {
        let reach = reach(source, clarity, project);
        let confidence = confidence(source, clarity, project);
        let effort = effort_level(impact, project);
        let impact = impact_level(impact, project);

        let priority_score = persisted_priority(reach, impact, confidence, effort);
        debug!(reach, impact, confidence, effort, priority_score, "RICE score");

        RiceScore {
            reach,
            impact,
            confidence,
            effort,
            priority_score,
        }
    }

    /// RICE fields of a heuristic candidate action, on the 1-10 scale.
    ///
    /// Impact and effort are the persisted levels tripled, so
    /// [`CandidateRice::to_persisted`] maps both back to [`RiceScorer::score`].
    /// [`potential_impact`] stays a separate advisory figure.
    pub fn score_candidate(
        &self,
        impact: Impact,
        source: Source,
        clarity: Clarity,
        project: Option<&ProjectContext>,
    ) -> CandidateRice {
        let reach = reach(source, clarity, project);
        let confidence = confidence(source, clarity, project);
        let effort = f64::from(effort_level(impact, project) * 3);
        let impact = f64::from(impact_level(impact, project) * 3);

        CandidateRice {
            reach,
            impact,
            confidence,
            effort,
            priority_score: candidate_priority(reach, impact, confidence, effort),
        }
    }
}

/// Multiplier shared by reach and confidence: 1.0, +0.2 for a north star,
/// +0.1 for core features.
pub fn project_multiplier(project: Option<&ProjectContext>) -> f64 {
    let mut multiplier = 1.0;
    if let Some(p) = project {
        if p.has_north_star() {
            multiplier += 0.2;
        }
        if p.has_core_features() {
            multiplier += 0.1;
        }
    }
    multiplier
}

fn scaled(base: f64, clarity: Clarity, project: Option<&ProjectContext>) -> f64 {
    (base * clarity.multiplier() * project_multiplier(project))
        .clamp(0.0, 100.0)
        .round()
}

/// Reach: 80/50/30 by source, scaled by clarity and project.
pub fn reach(source: Source, clarity: Clarity, project: Option<&ProjectContext>) -> f64 {
    let base = match source {
        Source::UserFeedback => 80.0,
        Source::TeamObservation => 50.0,
        Source::AssumptionIdea => 30.0,
    };
    scaled(base, clarity, project)
}

/// Confidence: 90/75/50 by source, scaled by clarity and project.
pub fn confidence(source: Source, clarity: Clarity, project: Option<&ProjectContext>) -> f64 {
    let base = match source {
        Source::UserFeedback => 90.0,
        Source::TeamObservation => 75.0,
        Source::AssumptionIdea => 50.0,
    };
    scaled(base, clarity, project)
}

/// Impact on the 1-3 scale, keyed by the insight's impact category.
///
/// This is the scoring-stage impact rule; the triage-stage keyword rule
/// lives in [`crate::triage::heuristic::impact_of`].
pub fn impact_level(impact: Impact, project: Option<&ProjectContext>) -> u8 {
    let base = impact.level();
    match project {
        Some(p) if p.has_north_star() => 3,
        Some(p) if p.has_core_features() => base.max(2),
        _ => base,
    }
}

/// Effort on the 1-3 scale: the impact level, plus one for a north star and
/// one for business objectives, capped at 3.
pub fn effort_level(impact: Impact, project: Option<&ProjectContext>) -> u8 {
    let mut effort = impact.level();
    if let Some(p) = project {
        if p.has_north_star() {
            effort = (effort + 1).min(3);
        }
        if p.has_business_objectives() {
            effort = (effort + 1).min(3);
        }
    }
    effort
}

fn valid(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn clamp_level(value: f64) -> u8 {
    value.round().clamp(1.0, 3.0) as u8
}

impl RiceInputs {
    /// Substitute defaults, clamp to valid ranges and compute the persisted
    /// priority score.
    pub fn normalize(&self) -> RiceScore {
        let reach = valid(self.reach).unwrap_or(DEFAULT_REACH).clamp(0.0, 100.0);
        let impact = valid(self.impact).map_or(DEFAULT_IMPACT, clamp_level);
        let confidence = valid(self.confidence)
            .unwrap_or(DEFAULT_CONFIDENCE)
            .clamp(0.0, 100.0);
        let effort = valid(self.effort).map_or(DEFAULT_EFFORT, clamp_level);

        RiceScore {
            reach,
            impact,
            confidence,
            effort,
            priority_score: persisted_priority(reach, impact, confidence, effort),
        }
    }
}

/// Priority score for the persisted 1-3 representation.
///
/// Inputs are clamped first, so any combination yields a score in 0-100.
pub fn persisted_priority(reach: f64, impact: u8, confidence: f64, effort: u8) -> u32 {
    let reach = if reach.is_finite() { reach.clamp(0.0, 100.0) } else { DEFAULT_REACH };
    let confidence = if confidence.is_finite() {
        confidence.clamp(0.0, 100.0)
    } else {
        DEFAULT_CONFIDENCE
    };
    let impact = f64::from(impact.clamp(1, 3));
    let effort = f64::from(effort.clamp(1, 3));

    let raw = reach * (impact * 30.0) * (confidence / 100.0) / (effort * 30.0);
    raw.clamp(0.0, 100.0).round() as u32
}

/// Priority score for the candidate 1-10 representation.
pub fn candidate_priority(reach: f64, impact: f64, confidence: f64, effort: f64) -> u32 {
    let effort = if effort.is_finite() && effort > 0.0 { effort } else { 1.0 };
    let raw = reach * impact * confidence / (effort * 100.0);
    if raw.is_finite() {
        raw.round().max(0.0) as u32
    } else {
        0
    }
}

/// Map a 1-10 impact onto the persisted 1-3 scale.
pub fn impact_to_persisted(impact: f64) -> u8 {
    if impact > 7.0 {
        3
    } else if impact > 3.0 {
        2
    } else {
        1
    }
}

/// Map a 1-10 effort onto the persisted 1-3 scale.
pub fn effort_to_persisted(effort: f64) -> u8 {
    if effort > 7.0 {
        3
    } else if effort > 3.0 {
        2
    } else {
        1
    }
}

/// Coarse 0-10 priority: `reach * impact * confidence / effort / 10`.
pub fn legacy_priority(reach: f64, impact: u8, confidence: f64, effort: u8) -> u8 {
    let effort = f64::from(effort.max(1));
    let raw = reach * f64::from(impact) * confidence / effort / 10.0;
    raw.round().clamp(0.0, 10.0) as u8
}

/// Estimated effort on the 1-3 scale, with half a point for business
/// objectives before rounding.
pub fn estimated_effort(impact: Impact, project: Option<&ProjectContext>) -> u8 {
    let mut effort = f64::from(impact.level());
    if let Some(p) = project {
        if p.has_north_star() {
            effort += 1.0;
        }
        if p.has_business_objectives() {
            effort += 0.5;
        }
    }
    effort.round().clamp(1.0, 3.0) as u8
}

/// Potential impact on the 1-10 scale: 9/6/3 by category, +2 for a north
/// star, +1 for core features, capped at 10.
pub fn potential_impact(impact: Impact, project: Option<&ProjectContext>) -> u8 {
    let mut score: u8 = match impact {
        Impact::CoreExperience => 9,
        Impact::ImproveExperience => 6,
        Impact::NiceToHave => 3,
    };
    if let Some(p) = project {
        if p.has_north_star() {
            score += 2;
        }
        if p.has_core_features() {
            score += 1;
        }
    }
    score.min(10)
}

impl CandidateRice {
    /// Build from raw 1-10 values, deriving the candidate priority score.
    pub fn new(reach: f64, impact: f64, confidence: f64, effort: f64) -> Self {
        Self {
            reach,
            impact,
            confidence,
            effort,
            priority_score: candidate_priority(reach, impact, confidence, effort),
        }
    }

    /// Convert to the persisted representation, recomputing the priority.
    pub fn to_persisted(&self) -> RiceScore {
        RiceInputs {
            reach: Some(self.reach),
            impact: Some(f64::from(impact_to_persisted(self.impact))),
            confidence: Some(self.confidence),
            effort: Some(f64::from(effort_to_persisted(self.effort))),
        }
        .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_project() -> ProjectContext {
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
        let score = RiceScorer.score(Impact::CoreExperience, Source::UserFeedback, Clarity::Clear, None);
        assert_eq!(score.reach, 96.0);
        assert_eq!(score.confidence, 100.0);
        assert_eq!(score.impact, 3);
        assert_eq!(score.effort, 3);
        assert_eq!(score.priority_score, 96);
    }

    #[test]
    fn test_vague_team_observation() {
        let score = RiceScorer.score(Impact::NiceToHave, Source::TeamObservation, Clarity::Vague, None);
        assert_eq!(score.reach, 40.0);
        assert_eq!(score.confidence, 60.0);
        assert_eq!(score.impact, 1);
        assert_eq!(score.effort, 1);
        // 40 * 30 * 0.6 / 30
        assert_eq!(score.priority_score, 24);
    }

    #[test]
    fn test_project_adjustments() {
        let p = full_project();
        let score = RiceScorer.score(Impact::NiceToHave, Source::AssumptionIdea, Clarity::Clear, Some(&p));
        // 30 * 1.2 * 1.3
        assert_eq!(score.reach, 47.0);
        // 50 * 1.2 * 1.3
        assert_eq!(score.confidence, 78.0);
        assert_eq!(score.impact, 3);
        assert_eq!(score.effort, 3);
        assert_eq!(score.priority_score, 37);
    }

    #[test]
    fn test_core_features_lift_impact() {
        let mut p = ProjectContext::new("Bare");
        p.core_features = vec!["Search".to_string()];
        assert_eq!(impact_level(Impact::NiceToHave, Some(&p)), 2);
        assert_eq!(impact_level(Impact::CoreExperience, Some(&p)), 3);
        assert_eq!(impact_level(Impact::NiceToHave, None), 1);
    }

    #[test]
    fn test_effort_caps_at_three() {
        let p = full_project();
        assert_eq!(effort_level(Impact::NiceToHave, Some(&p)), 3);
        assert_eq!(effort_level(Impact::ImproveExperience, Some(&p)), 3);

        let mut objectives_only = ProjectContext::new("Bare");
        objectives_only.current_business_objectives = vec!["Revenue".to_string()];
        assert_eq!(effort_level(Impact::NiceToHave, Some(&objectives_only)), 2);
    }

    #[test]
    fn test_normalize_defaults_and_clamps() {
        let score = RiceInputs::default().normalize();
        assert_eq!(score.reach, 50.0);
        assert_eq!(score.impact, 1);
        assert_eq!(score.confidence, 70.0);
        assert_eq!(score.effort, 1);
        assert_eq!(score.priority_score, 35);

        let wild = RiceInputs {
            reach: Some(500.0),
            impact: Some(-4.0),
            confidence: Some(f64::NAN),
            effort: Some(12.0),
        }
        .normalize();
        assert_eq!(wild.reach, 100.0);
        assert_eq!(wild.impact, 1);
        assert_eq!(wild.confidence, 70.0);
        assert_eq!(wild.effort, 3);
        assert_eq!(wild.priority_score, 23);
    }

    #[test]
    fn test_priority_always_in_range() {
        let values = [-50.0, 0.0, 1.0, 33.3, 100.0, 250.0, f64::INFINITY, f64::NAN];
        for reach in values {
            for confidence in values {
                for impact in 0..=5u8 {
                    for effort in 0..=5u8 {
                        let score = persisted_priority(reach, impact, confidence, effort);
                        assert!(score <= 100);
                    }
                }
            }
        }
    }

    #[test]
    fn test_priority_monotonic_in_reach() {
        for impact in 1..=3u8 {
            for effort in 1..=3u8 {
                let mut previous = 0;
                for reach in 0..=100 {
                    let score = persisted_priority(f64::from(reach), impact, 80.0, effort);
                    assert!(score >= previous, "reach={reach} impact={impact} effort={effort}");
                    previous = score;
                }
            }
        }
    }

    #[test]
    fn test_priority_antitone_in_effort() {
        for impact in 1..=3u8 {
            for reach in (0..=100).step_by(7) {
                let scores: Vec<u32> = (1..=3u8)
                    .map(|effort| persisted_priority(f64::from(reach), impact, 90.0, effort))
                    .collect();
                assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
            }
        }
    }

    #[test]
    fn test_candidate_priority() {
        assert_eq!(candidate_priority(50.0, 5.0, 70.0, 3.0), 58);
        assert_eq!(candidate_priority(50.0, 5.0, 50.0, 3.0), 42);
        assert_eq!(candidate_priority(80.0, 9.0, 90.0, 0.0), 648);
    }

    #[test]
    fn test_scale_mapping() {
        assert_eq!(impact_to_persisted(10.0), 3);
        assert_eq!(impact_to_persisted(7.5), 3);
        assert_eq!(impact_to_persisted(7.0), 2);
        assert_eq!(impact_to_persisted(4.0), 2);
        assert_eq!(impact_to_persisted(3.0), 1);
        assert_eq!(effort_to_persisted(9.0), 3);
        assert_eq!(effort_to_persisted(6.0), 2);
        assert_eq!(effort_to_persisted(1.0), 1);
    }

    #[test]
    fn test_candidate_to_persisted() {
        let candidate = CandidateRice::new(50.0, 5.0, 70.0, 3.0);
        assert_eq!(candidate.priority_score, 58);

        let persisted = candidate.to_persisted();
        assert_eq!(persisted.impact, 2);
        assert_eq!(persisted.effort, 1);
        // 50 * 60 * 0.7 / 30
        assert_eq!(persisted.priority_score, 70);
    }

    #[test]
    fn test_heuristic_candidate_round_trips_levels() {
        let p = full_project();
        for impact in Impact::ALL {
            for project in [None, Some(&p)] {
                let candidate = RiceScorer.score_candidate(impact, Source::UserFeedback, Clarity::Clear, project);
                let persisted = RiceScorer.score(impact, Source::UserFeedback, Clarity::Clear, project);
                assert_eq!(impact_to_persisted(candidate.impact), persisted.impact);
                assert_eq!(effort_to_persisted(candidate.effort), persisted.effort);
                assert_eq!(candidate.to_persisted(), persisted);
            }
        }
    }

    #[test]
    fn test_legacy_figures() {
        assert_eq!(legacy_priority(96.0, 3, 100.0, 3), 10);
        assert_eq!(legacy_priority(0.0, 3, 100.0, 3), 0);
        assert_eq!(legacy_priority(10.0, 1, 5.0, 1), 5);

        let p = full_project();
        assert_eq!(estimated_effort(Impact::NiceToHave, None), 1);
        // 1 + 1 + 0.5 rounds to 3
        assert_eq!(estimated_effort(Impact::NiceToHave, Some(&p)), 3);
        assert_eq!(potential_impact(Impact::ImproveExperience, None), 6);
        assert_eq!(potential_impact(Impact::ImproveExperience, Some(&p)), 9);
        assert_eq!(potential_impact(Impact::CoreExperience, Some(&p)), 10);
    }
}
