//! End-to-end processing of one insight: validate, classify, and for passed
//! insights generate and score actions.

use serde::Serialize;
use tracing::{debug, info};

use crate::action::model::{Action, ActionGenerationResult, GeneratedBy};
use crate::action::{ActionGenerator, HeuristicGenerator};
use crate::error::ExtractorResult;
use crate::insight::model::{Insight, InsightInput};
use crate::project::model::ProjectContext;
use crate::triage::model::TriageResult;
use crate::triage::{Classifier, HeuristicClassifier};

/// Everything produced for one insight.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutcome {
    /// The insight in its triaged state.
    pub insight: Insight,
    pub triage: TriageResult,
    /// Present only when triage passed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<ActionGenerationResult>,
    /// One persisted action per candidate.
    pub actions: Vec<Action>,
}

/// Classifier plus generator.
pub struct InsightPipeline<C, G> {
    classifier: C,
    generator: G,
}

impl InsightPipeline<HeuristicClassifier, HeuristicGenerator> {
    /// Pipeline that needs no external service.
    pub fn heuristic() -> Self {
        Self::new(HeuristicClassifier::new(), HeuristicGenerator::new())
    }
}

impl<C: Classifier, G: ActionGenerator> InsightPipeline<C, G> {
    pub fn new(classifier: C, generator: G) -> Self {
        Self {
            classifier,
            generator,
        }
    }

    /// Process one insight.
    ///
    /// Only invalid input is an error. Classifier and generator failures
    /// surface as their fallback results.
    pub async fn process(
        &self,
        input: InsightInput,
        project: Option<&ProjectContext>,
    ) -> ExtractorResult<PipelineOutcome> {
        input.validate()?;

        let mut insight = Insight::new(input);
        let triage = self
            .classifier
            .classify(&insight.text, insight.source, project)
            .await;
        insight.apply_triage(triage.clarity, triage.impact, triage.score, triage.triage_status)?;

        info!(
            source = %insight.source,
            score = triage.score,
            status = %triage.triage_status,
            "Insight triaged"
        );

        let Some(triaged) = insight.triaged().filter(|_| triage.passed()) else {
            return Ok(PipelineOutcome {
                insight,
                triage,
                generation: None,
                actions: Vec::new(),
            });
        };

        let generation = self.generator.generate(&triaged, triage.score, project).await;
        let analysis = generation.analysis();
        let actions: Vec<Action> = generation
            .actions
            .iter()
            .map(|candidate| {
                let action = Action::from_candidate(candidate, GeneratedBy::Ai).with_analysis(analysis.clone());
                match &generation.category_area {
                    Some(category) => action.with_category_area(category.clone()),
                    None => action,
                }
            })
            .collect();

        debug!(
            actions = actions.len(),
            top_priority = actions.iter().map(Action::priority_score).max().unwrap_or(0),
            "Actions generated"
        );

        Ok(PipelineOutcome {
            insight,
            triage,
            generation: Some(generation),
            actions,
        })
    }
}
