//! Insight triage: clarity, impact, score and pass/fail status.

pub mod ai;
pub mod heuristic;
pub mod model;

use async_trait::async_trait;

use crate::insight::model::Source;
use crate::project::model::ProjectContext;
use model::TriageResult;

pub use ai::AiClassifier;
pub use heuristic::HeuristicClassifier;

/// Capability to classify an insight.
///
/// Implementations never fail; a broken collaborator yields a fallback result.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str, source: Source, project: Option<&ProjectContext>) -> TriageResult;
}
