//! Insights and their triage lifecycle.

pub mod model;

use model::{Clarity, Impact, Source, TriageStatus};

/// Triage score and status as recomputed by the storage layer.
///
/// Unlike the classifier score this counts only source and impact points,
/// with no clarity or project bonus. The status still goes through
/// [`TriageStatus::from_triage`].
pub fn stored_triage(source: Source, clarity: Clarity, impact: Impact) -> (u32, TriageStatus) {
    let score = source.points() + u32::from(impact.level());
    (score, TriageStatus::from_triage(clarity, score))
}
