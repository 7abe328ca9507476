//! Insight Extractor core library.
//!
//! Triage classification, RICE scoring and action generation for product
//! insights, with optional AI-backed implementations that fall back to
//! fixed results when the model is unavailable.

pub mod action;
pub mod ai;
pub mod config;
pub mod error;
pub mod insight;
pub mod pipeline;
pub mod project;
pub mod rice;
pub mod triage;

pub use error::{ExtractorError, ExtractorResult};
pub use pipeline::{InsightPipeline, PipelineOutcome};
