//! Keyword-driven action generation.
//!
//! Every random choice (template, fallback domains, category label) goes
//! through a [`SelectionSource`], so a seeded RNG reproduces a run exactly.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::domains::{Domain, DomainTable};
use super::model::{ActionGenerationResult, CandidateAction};
use super::ActionGenerator;
use crate::insight::model::{Impact, Source, TriagedInsight};
use crate::project::model::ProjectContext;
use crate::rice::{estimated_effort, legacy_priority, potential_impact, RiceScorer};

/// Uniform choice among `len` options.
pub trait SelectionSource {
    /// Index in `0..len`. Callers never pass zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> SelectionSource for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Heuristic [`ActionGenerator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicGenerator {
    seed: Option<u64>,
}

impl HeuristicGenerator {
    /// Generator drawing fresh entropy on every call.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Generator that replays the same choices on every call.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Generate with a caller-supplied selection source.
    pub fn generate_with<S: SelectionSource + ?Sized>(
        &self,
        insight: &TriagedInsight,
        project: Option<&ProjectContext>,
        rng: &mut S,
    ) -> ActionGenerationResult {
        let table = DomainTable::standard();
        let matches = table.matches(&insight.text);
        let fallback = matches.is_empty();

        let picked: Vec<(&Domain, Vec<&'static str>)> = if fallback {
            fallback_domains(table, rng).into_iter().map(|d| (d, Vec::new())).collect()
        } else {
            matches
        };

        let scorer = RiceScorer::new();
        let rice = scorer.score_candidate(insight.impact, insight.source, insight.clarity, project);
        let persisted = scorer.score(insight.impact, insight.source, insight.clarity, project);
        let priority = legacy_priority(persisted.reach, persisted.impact, persisted.confidence, persisted.effort);

        let actions: Vec<CandidateAction> = picked
            .iter()
            .map(|(domain, hits)| {
                let template = domain.render(rng.pick(domain.templates.len()));
                let rationale = if hits.is_empty() {
                    format!("No domain keywords matched; {} chosen as a fallback", domain.name)
                } else {
                    format!("Matched {} keywords: {}", domain.name, hits.join(", "))
                };
                CandidateAction {
                    domain: domain.name.to_string(),
                    description: describe(insight.source, insight.impact, &template, project),
                    rationale,
                    rice_scoring: rice,
                    priority,
                }
            })
            .collect();

        let category = category_area(insight.source, project, rng);
        debug!(
            actions = actions.len(),
            fallback,
            category = %category,
            priority_score = rice.priority_score,
            "Heuristic action generation"
        );

        let domains: Vec<&str> = actions.iter().map(|a| a.domain.as_str()).collect();
        let full_reasoning = format!(
            "{} insight with {} impact mapped to {}: {}.",
            insight.source.description(),
            insight.impact.as_str(),
            if fallback { "randomly chosen domains" } else { "keyword-matched domains" },
            domains.join(", ")
        );

        let key_insights = vec![
            format!("Potential impact {}/10", potential_impact(insight.impact, project)),
            format!("Estimated effort {}/3", estimated_effort(insight.impact, project)),
        ];
        let potential_challenges = if fallback {
            vec!["No domain keywords matched the insight text".to_string()]
        } else {
            Vec::new()
        };

        ActionGenerationResult {
            actions,
            category_area: Some(category),
            full_reasoning,
            key_insights,
            potential_challenges,
        }
    }
}

#[async_trait]
impl ActionGenerator for HeuristicGenerator {
    async fn generate(
        &self,
        insight: &TriagedInsight,
        _triage_score: u32,
        project: Option<&ProjectContext>,
    ) -> ActionGenerationResult {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_with(insight, project, &mut rng)
    }
}

/// One to three distinct domains in random order.
fn fallback_domains<'a, S: SelectionSource + ?Sized>(table: &'a DomainTable, rng: &mut S) -> Vec<&'a Domain> {
    let mut pool: Vec<&Domain> = table.domains().iter().collect();
    let count = (1 + rng.pick(3)).min(pool.len());
    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        let i = rng.pick(pool.len());
        chosen.push(pool.swap_remove(i));
    }
    chosen
}

pub fn source_prefix(source: Source) -> &'static str {
    match source {
        Source::UserFeedback => "Address user-reported",
        Source::TeamObservation => "Implement team-identified",
        Source::AssumptionIdea => "Explore potential",
    }
}

pub fn impact_phrase(impact: Impact) -> &'static str {
    match impact {
        Impact::CoreExperience => "critical improvement for",
        Impact::ImproveExperience => "enhancement to",
        Impact::NiceToHave => "optimization of",
    }
}

/// `"{prefix} {phrase} {template}{ for <name> project}"`.
pub fn describe(source: Source, impact: Impact, template: &str, project: Option<&ProjectContext>) -> String {
    let suffix = project
        .map(|p| format!(" for {} project", p.name))
        .unwrap_or_default();
    format!("{} {} {}{}", source_prefix(source), impact_phrase(impact), template, suffix)
        .trim()
        .to_string()
}

/// Category labels available for a source, plus project extras.
pub fn category_options(source: Source, project: Option<&ProjectContext>) -> Vec<&'static str> {
    let mut options = match source {
        Source::UserFeedback => vec![
            "User Experience",
            "Product Improvement",
            "Customer Satisfaction",
            "Feature Enhancement",
        ],
        Source::TeamObservation => vec![
            "Internal Process",
            "Product Strategy",
            "Technical Optimization",
            "Team Efficiency",
        ],
        Source::AssumptionIdea => vec![
            "Innovation",
            "Future Development",
            "Strategic Planning",
            "Exploratory Initiative",
        ],
    };
    if let Some(p) = project {
        if p.has_north_star() {
            options.push("Strategic Alignment");
        }
        if p.has_core_features() {
            options.push("Core Feature Development");
        }
    }
    options
}

/// Pick a category label.
pub fn category_area<S: SelectionSource + ?Sized>(
    source: Source,
    project: Option<&ProjectContext>,
    rng: &mut S,
) -> String {
    let options = category_options(source, project);
    options[rng.pick(options.len())].to_string()
}

/// Single-string form of a generation: descriptions joined by `"; "`.
pub fn join_descriptions(actions: &[CandidateAction]) -> String {
    actions
        .iter()
        .map(|a| a.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::model::Clarity;

    fn insight(text: &str, source: Source, impact: Impact) -> TriagedInsight {
        TriagedInsight {
            text: text.to_string(),
            source,
            clarity: Clarity::Clear,
            impact,
        }
    }

    fn project() -> ProjectContext {
        ProjectContext {
            name: "Nestling".to_string(),
            north_star_objective: Some("Weekly active parents".to_string()),
            core_features: vec!["Sleep tracker".to_string()],
            ..ProjectContext::default()
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(
                Source::UserFeedback,
                Impact::CoreExperience,
                "Redesign project interface to improve user engagement",
                None
            ),
            "Address user-reported critical improvement for Redesign project interface to improve user engagement"
        );
        assert_eq!(
            describe(Source::AssumptionIdea, Impact::NiceToHave, "Develop process automation strategy", Some(&project())),
            "Explore potential optimization of Develop process automation strategy for Nestling project"
        );
    }

    #[test]
    fn test_matched_domains_in_table_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = HeuristicGenerator::new().generate_with(
            &insight(
                "The checkout layout confuses customers and the API is slow",
                Source::UserFeedback,
                Impact::CoreExperience,
            ),
            None,
            &mut rng,
        );

        let domains: Vec<_> = result.actions.iter().map(|a| a.domain.as_str()).collect();
        assert_eq!(domains, vec!["product", "service", "technology"]);
        for action in &result.actions {
            assert!(action.description.starts_with("Address user-reported critical improvement for "));
            assert!(!action.description.contains("{domain}"));
            assert!(action.rationale.starts_with("Matched"));
            let domain = DomainTable::standard().get(&action.domain).unwrap();
            assert!((0..5).any(|i| action.description.ends_with(&domain.render(i))));
        }
        assert_eq!(result.actions[0].rationale, "Matched product keywords: layout");
        assert!(result.potential_challenges.is_empty());
    }

    #[test]
    fn test_candidate_scoring() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = HeuristicGenerator::new().generate_with(
            &insight("Improve the interface", Source::UserFeedback, Impact::CoreExperience),
            None,
            &mut rng,
        );
        let action = &result.actions[0];
        assert_eq!(action.rice_scoring.reach, 96.0);
        assert_eq!(action.rice_scoring.impact, 9.0);
        assert_eq!(action.rice_scoring.confidence, 100.0);
        assert_eq!(action.rice_scoring.effort, 9.0);
        // 96 * 9 * 100 / 900
        assert_eq!(action.rice_scoring.priority_score, 96);
        assert_eq!(action.priority, 10);
        assert_eq!(result.key_insights, vec!["Potential impact 9/10", "Estimated effort 3/3"]);
    }

    #[test]
    fn test_no_match_falls_back_to_random_domains() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = HeuristicGenerator::new().generate_with(
                &insight("zzz qqq", Source::AssumptionIdea, Impact::NiceToHave),
                None,
                &mut rng,
            );
            let n = result.actions.len();
            assert!((1..=3).contains(&n), "seed {seed} gave {n} actions");

            let mut names: Vec<_> = result.actions.iter().map(|a| a.domain.clone()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), n, "fallback domains must be distinct");
            assert!(result.actions.iter().all(|a| a.description.starts_with("Explore potential optimization of ")));
            assert_eq!(result.potential_challenges.len(), 1);
        }
    }

    #[test]
    fn test_empty_text_still_generates() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = HeuristicGenerator::new().generate_with(
            &insight("", Source::TeamObservation, Impact::NiceToHave),
            None,
            &mut rng,
        );
        assert!(!result.actions.is_empty());
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let i = insight("Support and onboarding need a new roadmap", Source::TeamObservation, Impact::ImproveExperience);
        let p = project();
        let a = HeuristicGenerator::new().generate_with(&i, Some(&p), &mut StdRng::seed_from_u64(42));
        let b = HeuristicGenerator::new().generate_with(&i, Some(&p), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(a.actions.iter().all(|x| x.description.ends_with(" for Nestling project")));
    }

    #[tokio::test]
    async fn test_seeded_generator_trait() {
        let i = insight("qqq", Source::UserFeedback, Impact::ImproveExperience);
        let generator = HeuristicGenerator::seeded(9);
        let first = generator.generate(&i, 7, None).await;
        let second = generator.generate(&i, 7, None).await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_category_options() {
        assert_eq!(category_options(Source::UserFeedback, None).len(), 4);
        let with_project = category_options(Source::TeamObservation, Some(&project()));
        assert_eq!(with_project.len(), 6);
        assert_eq!(&with_project[4..], &["Strategic Alignment", "Core Feature Development"]);

        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let category = category_area(Source::AssumptionIdea, None, &mut rng);
            assert!(category_options(Source::AssumptionIdea, None).contains(&category.as_str()));
        }
    }

    #[test]
    fn test_join_descriptions() {
        let mut rng = StdRng::seed_from_u64(11);
        let result = HeuristicGenerator::new().generate_with(
            &insight("layout and support", Source::UserFeedback, Impact::ImproveExperience),
            None,
            &mut rng,
        );
        let joined = join_descriptions(&result.actions);
        assert_eq!(joined.split("; ").count(), result.actions.len());
        assert!(joined.starts_with(&result.actions[0].description));
    }
}
