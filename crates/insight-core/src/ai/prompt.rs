//! Prompt templates for the AI-backed triage and action generation.

use tera::{Context, Tera};

use crate::error::ExtractorResult;
use crate::insight::model::{Source, TriagedInsight};
use crate::project::model::ProjectContext;

const TRIAGE_TEMPLATE: &str = r#"You are an AI assistant performing advanced insight triage for a product team.

Analyze the following insight with extreme precision:

Insight Source: {{ source }}
Insight Description: {{ text }}

Project Context:
{% if project %}{{ project }}{% else %}No specific project context provided{% endif %}

Provide a comprehensive triage assessment focusing on:
1. Clarity of the insight (clear or vague)
2. Impact level (core user experience, improve experience, or nice to have)
3. Contextual Relevance (how directly this impacts the core user journey)
4. Innovation Potential (how novel the insight is)
5. Urgency (time-sensitivity of addressing this insight)
6. User Sentiment (emotional tone of the feedback)
7. Primary Domain and Affected Features

Scoring Guidelines:
- Clarity: Based on specificity, completeness of information
- Impact: Evaluate potential transformation of user experience
- Contextual Relevance: Alignment with core product goals
- Innovation Potential: Uniqueness of the proposed improvement
- Urgency: Immediate vs. long-term need
- User Sentiment: Emotional undertone of the feedback

Respond in strict JSON format with detailed scoring:
{
  "clarity": "clear|vague",
  "impact": "core_experience|improve_experience|nice_to_have",
  "explanation": "Detailed reasoning...",
  "score": number,
  "triageStatus": "passed|research_needed|rejected",
  "contextualRelevance": number,
  "innovationPotential": number,
  "urgency": number,
  "userSentiment": "positive|neutral|negative",
  "primaryDomain": "string",
  "affectedFeatures": ["string"]
}

Be precise, analytical, and provide nuanced insights."#;

const ACTION_TEMPLATE: &str = r#"You are an expert product strategist specializing in generating actionable insights with precise RICE scoring.

Insight Context:
- Source: {{ source }}
- Text: {{ text }}
- Triage Impact: {{ impact }}
- Triage Score: {{ score }}

Project Context:
{% if project %}{{ project }}{% else %}No specific project context provided{% endif %}

RICE Scoring Guidelines:
1. Reach (0-100):
   - How many users/customers will this action impact?
   - Consider total addressable market and potential user base
   - Align with project's ideal customer profile

2. Impact (1-10):
   - Potential transformative effect on user experience
   - Alignment with north star objective
   - Potential to solve core user problems

3. Confidence (0-100):
   - Likelihood of successful implementation
   - Clarity of action and potential outcomes
   - Based on insight source and triage score

4. Effort (1-10):
   - Resources required for implementation
   - Technical complexity
   - Time and team capacity needed

Task:
1. Generate 3-5 actionable strategies
2. For EACH action, provide:
   - Specific domain
   - Detailed description
   - Comprehensive rationale
   - Precise RICE scoring
   - Overall priority

Response Format (Strict JSON):
{
  "actions": [
    {
      "domain": "string",
      "description": "string",
      "rationale": "string",
      "riceScoring": {
        "reach": number,
        "impact": number,
        "confidence": number,
        "effort": number,
        "priorityScore": number
      },
      "priority": number
    }
  ],
  "fullReasoning": "string",
  "keyInsights": ["string"],
  "potentialChallenges": ["string"]
}

Scoring Calculation:
- Priority Score = (Reach * Impact * Confidence) / (Effort * 100)
- Priority on a 1-10 scale
- Consider project context and triage insights"#;

/// Render the triage prompt.
pub fn triage_prompt(
    text: &str,
    source: Source,
    project: Option<&ProjectContext>,
) -> ExtractorResult<String> {
    let mut context = Context::new();
    context.insert("source", source.as_str());
    context.insert("text", text);
    context.insert("project", &project.map(ProjectContext::to_markdown));

    Ok(Tera::one_off(TRIAGE_TEMPLATE, &context, false)?)
}

/// Render the action generation prompt.
pub fn action_prompt(
    insight: &TriagedInsight,
    triage_score: u32,
    project: Option<&ProjectContext>,
) -> ExtractorResult<String> {
    let mut context = Context::new();
    context.insert("source", insight.source.as_str());
    context.insert("text", &insight.text);
    context.insert("impact", insight.impact.as_str());
    context.insert("score", &triage_score);
    context.insert("project", &project.map(ProjectContext::to_markdown));

    Ok(Tera::one_off(ACTION_TEMPLATE, &context, false)?)
}
