//! Action generation from passed insights, and the persisted action record.

pub mod ai;
pub mod domains;
pub mod generator;
pub mod model;

use async_trait::async_trait;

use crate::insight::model::TriagedInsight;
use crate::project::model::ProjectContext;
use model::ActionGenerationResult;

pub use ai::AiActionGenerator;
pub use generator::{join_descriptions, HeuristicGenerator, SelectionSource};

/// Capability to propose actions for a classified insight.
///
/// Implementations never fail and always return at least one action.
#[async_trait]
pub trait ActionGenerator: Send + Sync {
    async fn generate(
        &self,
        insight: &TriagedInsight,
        triage_score: u32,
        project: Option<&ProjectContext>,
    ) -> ActionGenerationResult;
}
