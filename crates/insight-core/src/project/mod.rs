//! Project context: the optional collaborator data that biases scoring.

pub mod model;

use std::path::Path;

use crate::error::{ExtractorError, ExtractorResult};
use model::{Alignment, ProjectContext};

/// Load a project context from a `.json` or `.toml` file.
pub fn load_project(path: &Path) -> ExtractorResult<ProjectContext> {
    let content = std::fs::read_to_string(path)?;

    let project = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => ProjectContext::from_toml(&content)?,
        Some("json") | None => ProjectContext::from_json(&content)?,
        Some(other) => {
            return Err(ExtractorError::validation(format!(
                "Unsupported project file extension '{}', expected .json or .toml",
                other
            )))
        }
    };

    if project.name.trim().is_empty() {
        return Err(ExtractorError::validation("Project name is required"));
    }

    Ok(project)
}

/// Lowercase words drawn from core features, north star and value proposition.
pub fn context_words(project: &ProjectContext) -> Vec<String> {
    project
        .core_features
        .iter()
        .map(String::as_str)
        .chain(project.north_star())
        .chain(project.value_proposition())
        .flat_map(str::split_whitespace)
        .map(str::to_lowercase)
        .collect()
}

/// Whether any project context word occurs in the text.
pub fn mentions_context(project: &ProjectContext, text: &str) -> bool {
    let lowered = text.to_lowercase();
    context_words(project)
        .iter()
        .any(|word| lowered.contains(word.as_str()))
}

/// Count whole context phrases (name, proposition, objectives, features)
/// found in the text and bucket the count.
pub fn assess_alignment(project: &ProjectContext, text: &str) -> Alignment {
    let lowered = text.to_lowercase();

    let phrases = std::iter::once(project.name.as_str())
        .chain(project.value_proposition())
        .chain(project.north_star())
        .chain(project.core_features.iter().map(String::as_str))
        .chain(project.current_business_objectives.iter().map(String::as_str));

    let matched = phrases
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty() && lowered.contains(p.as_str()))
        .count();

    Alignment::from_matches(matched)
}
