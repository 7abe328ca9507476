//! RICE scoring commands.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use insight_core::insight::model::{Clarity, Impact, Source};
use insight_core::rice::model::{CandidateRice, RiceInputs, RiceScore};
use insight_core::rice::RiceScorer;

use super::{print_json, Session};
use crate::output;

#[derive(Args)]
pub struct ScoreArgs {
    /// Impact category from triage
    #[arg(short, long)]
    pub impact: Impact,

    /// Where the insight came from
    #[arg(short, long, default_value = "user_feedback")]
    pub source: Source,

    /// Clarity from triage
    #[arg(long, default_value = "clear")]
    pub clarity: Clarity,
}

#[derive(Args)]
pub struct PriorityArgs {
    /// Reach, 0-100
    #[arg(long)]
    pub reach: Option<f64>,

    /// Impact, 1-3 (1-10 with --candidate)
    #[arg(long)]
    pub impact: Option<f64>,

    /// Confidence, 0-100
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Effort, 1-3 (1-10 with --candidate)
    #[arg(long)]
    pub effort: Option<f64>,

    /// Treat impact and effort as 1-10 candidate values
    #[arg(long)]
    pub candidate: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport {
    persisted: RiceScore,
    candidate: CandidateRice,
}

pub fn execute_score(args: ScoreArgs, session: &Session) -> Result<()> {
    let scorer = RiceScorer::new();
    let report = ScoreReport {
        persisted: scorer.score(args.impact, args.source, args.clarity, session.project()),
        candidate: scorer.score_candidate(args.impact, args.source, args.clarity, session.project()),
    };

    if session.json {
        return print_json(&report);
    }

    output::print_rice(&report.persisted);
    println!();
    output::print_candidate_rice(&report.candidate);
    Ok(())
}

pub fn execute_priority(args: PriorityArgs, session: &Session) -> Result<()> {
    if args.candidate {
        let candidate = CandidateRice::new(
            args.reach.unwrap_or(50.0),
            args.impact.unwrap_or(5.0),
            args.confidence.unwrap_or(70.0),
            args.effort.unwrap_or(3.0),
        );
        let report = ScoreReport {
            persisted: candidate.to_persisted(),
            candidate,
        };

        if session.json {
            return print_json(&report);
        }

        output::print_candidate_rice(&report.candidate);
        println!();
        output::print_rice(&report.persisted);
        return Ok(());
    }

    let score = RiceInputs {
        reach: args.reach,
        impact: args.impact,
        confidence: args.confidence,
        effort: args.effort,
    }
    .normalize();

    if session.json {
        return print_json(&score);
    }

    output::print_rice(&score);
    Ok(())
}
