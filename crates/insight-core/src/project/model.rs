//! Project context models.

use serde::{Deserialize, Serialize};

/// Read-only project context used to bias scoring.
///
/// Field aliases accept the camelCase documents exported by the insights API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectContext {
    pub name: String,
    pub details: Option<String>,
    #[serde(alias = "valueProposition")]
    pub value_proposition: Option<String>,
    #[serde(alias = "northStarObjective")]
    pub north_star_objective: Option<String>,
    #[serde(alias = "coreFeatures")]
    pub core_features: Vec<String>,
    #[serde(alias = "idealCustomerProfile")]
    pub ideal_customer_profile: Option<String>,
    #[serde(alias = "currentBusinessObjectives")]
    pub current_business_objectives: Vec<String>,
}

impl ProjectContext {
    /// Create a context with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create from TOML string.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn north_star(&self) -> Option<&str> {
        non_blank(self.north_star_objective.as_deref())
    }

    pub fn value_proposition(&self) -> Option<&str> {
        non_blank(self.value_proposition.as_deref())
    }

    pub fn has_north_star(&self) -> bool {
        self.north_star().is_some()
    }

    pub fn has_core_features(&self) -> bool {
        any_non_blank(&self.core_features)
    }

    pub fn has_business_objectives(&self) -> bool {
        any_non_blank(&self.current_business_objectives)
    }

    /// Format as compact markdown for AI prompts.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("- Project Name: {}\n", self.name));
        md.push_str(&format!(
            "- Value Proposition: {}\n",
            self.value_proposition().unwrap_or("Not specified")
        ));
        md.push_str(&format!(
            "- North Star Objective: {}\n",
            self.north_star().unwrap_or("Not specified")
        ));
        md.push_str(&format!(
            "- Core Features: {}\n",
            if self.core_features.is_empty() {
                "Not specified".to_string()
            } else {
                self.core_features.join(", ")
            }
        ));
        md.push_str(&format!(
            "- Ideal Customer Profile: {}\n",
            non_blank(self.ideal_customer_profile.as_deref()).unwrap_or("Not specified")
        ));
        md
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn any_non_blank(values: &[String]) -> bool {
    values.iter().any(|v| !v.trim().is_empty())
}

/// How strongly an insight's text echoes the project context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Strong,
    Partial,
    Limited,
}

impl Alignment {
    /// Bucket a count of matched context phrases.
    pub fn from_matches(count: usize) -> Self {
        match count {
            0 => Self::Limited,
            1 | 2 => Self::Partial,
            _ => Self::Strong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "Strong Alignment",
            Self::Partial => "Partial Alignment",
            Self::Limited => "Limited Alignment",
        }
    }
}
