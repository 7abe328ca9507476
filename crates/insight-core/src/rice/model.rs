//! RICE score models.
//!
//! Two representations coexist. [`RiceScore`] is the persisted shape with
//! impact and effort on a 1-3 scale; [`CandidateRice`] is the generator
//! shape with impact and effort on a 1-10 scale. Converting one into the
//! other always goes through the named mapping functions in the parent
//! module.

use serde::{Deserialize, Serialize};

/// Persisted RICE fields of an action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiceScore {
    /// 0-100.
    pub reach: f64,
    /// 1-3.
    pub impact: u8,
    /// 0-100.
    pub confidence: f64,
    /// 1-3.
    pub effort: u8,
    /// 0-100, derived.
    pub priority_score: u32,
}

/// Loose RICE inputs, e.g. from a manual edit or an untyped document.
///
/// Anything missing or non-finite is replaced by a default when normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiceInputs {
    pub reach: Option<f64>,
    pub impact: Option<f64>,
    pub confidence: Option<f64>,
    pub effort: Option<f64>,
}

/// RICE scoring of a candidate action, impact and effort on a 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRice {
    pub reach: f64,
    pub impact: f64,
    pub confidence: f64,
    pub effort: f64,
    pub priority_score: u32,
}
