//! Terminal output formatting.

use std::time::Duration;

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use unicode_width::UnicodeWidthStr;

use insight_core::action::model::{Action, ActionGenerationResult, CandidateAction};
use insight_core::insight::model::TriageStatus;
use insight_core::rice::model::{CandidateRice, RiceScore};
use insight_core::triage::model::TriageResult;
use insight_core::PipelineOutcome;

/// Spinner shown while waiting on the model. Hidden in JSON mode.
pub fn spinner(message: &str, json: bool) -> Option<ProgressBar> {
    if json {
        return None;
    }

    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    Some(bar)
}

pub fn finish(spinner: Option<ProgressBar>) {
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
}

fn status_colored(status: TriageStatus) -> ColoredString {
    match status {
        TriageStatus::Passed => status.as_str().green().bold(),
        TriageStatus::ResearchNeeded => status.as_str().yellow().bold(),
        TriageStatus::Rejected => status.as_str().red().bold(),
        TriageStatus::Pending => status.as_str().dimmed(),
    }
}

fn priority_colored(score: u32) -> ColoredString {
    let text = score.to_string();
    match score {
        70.. => text.green().bold(),
        40..=69 => text.yellow(),
        _ => text.normal(),
    }
}

/// Print a triage result.
pub fn print_triage(result: &TriageResult) {
    println!("{}", "Triage".bold());
    println!("{}", "─".repeat(40));
    println!("  Status:  {}", status_colored(result.triage_status));
    println!("  Score:   {}", result.score.to_string().cyan());
    println!("  Clarity: {}", result.clarity);
    println!("  Impact:  {}", result.impact);

    if let Some(details) = &result.details {
        println!();
        println!("  Relevance:   {:.0}", details.contextual_relevance);
        println!("  Innovation:  {:.0}", details.innovation_potential);
        println!("  Urgency:     {:.0}", details.urgency);
        println!("  Sentiment:   {}", details.user_sentiment.as_str());
        if let Some(domain) = &details.primary_domain {
            println!("  Domain:      {}", domain);
        }
        if !details.affected_features.is_empty() {
            println!("  Features:    {}", details.affected_features.join(", "));
        }
    }

    println!();
    for line in result.explanation.lines() {
        println!("  {}", line.dimmed());
    }
}

/// Print persisted RICE fields.
pub fn print_rice(score: &RiceScore) {
    println!("{}", "RICE (persisted, 1-3)".bold());
    println!("{}", "─".repeat(40));
    println!("  Reach:      {:.0}", score.reach);
    println!("  Impact:     {}", score.impact);
    println!("  Confidence: {:.0}", score.confidence);
    println!("  Effort:     {}", score.effort);
    println!("  Priority:   {}", priority_colored(score.priority_score));
}

/// Print candidate RICE fields.
pub fn print_candidate_rice(rice: &CandidateRice) {
    println!("{}", "RICE (candidate, 1-10)".bold());
    println!("{}", "─".repeat(40));
    println!("  Reach:      {:.0}", rice.reach);
    println!("  Impact:     {:.0}", rice.impact);
    println!("  Confidence: {:.0}", rice.confidence);
    println!("  Effort:     {:.0}", rice.effort);
    println!("  Priority:   {}", rice.priority_score.to_string().cyan());
}

fn print_candidate(index: usize, action: &CandidateAction, width: usize) {
    println!(
        "  {}. {} {}",
        index + 1,
        action.domain.cyan().bold(),
        format!("(priority {})", action.priority).dimmed()
    );
    println!("     {}", truncate_visual(&action.description, width.saturating_sub(5)));
    println!("     {}", truncate_visual(&action.rationale, width.saturating_sub(5)).dimmed());
    let rice = &action.rice_scoring;
    println!(
        "     R {:.0}  I {:.0}  C {:.0}  E {:.0}  => {}",
        rice.reach, rice.impact, rice.confidence, rice.effort, rice.priority_score
    );
}

/// Print a generation result.
pub fn print_generation(result: &ActionGenerationResult) {
    let width = term_width();

    println!("{}", "Candidate Actions".bold());
    println!("{}", "─".repeat(40));
    if let Some(category) = &result.category_area {
        println!("  Category: {}", category.magenta());
        println!();
    }
    for (i, action) in result.actions.iter().enumerate() {
        print_candidate(i, action, width);
    }

    println!();
    println!("  {}", result.full_reasoning.dimmed());
    print_list("Key insights", &result.key_insights);
    print_list("Potential challenges", &result.potential_challenges);
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("  {}", title.bold());
    for item in items {
        println!("    - {}", item);
    }
}

/// Print persisted actions as a table.
pub fn print_actions_table(actions: &[Action]) {
    if actions.is_empty() {
        println!("{}", "No actions generated.".dimmed());
        return;
    }

    let desc_width = term_width().saturating_sub(36).max(20);
    println!(
        "{:<8} {:<4} {:<4} {:<4} {:<4} {}",
        "Priority", "R", "I", "C", "E", "Description"
    );
    println!("{}", "─".repeat(36 + desc_width.min(60)));

    for action in actions {
        println!(
            "{} {:<4.0} {:<4} {:<4.0} {:<4} {}",
            pad_right(&action.priority_score().to_string(), 8),
            action.reach,
            action.impact,
            action.confidence,
            action.effort,
            truncate_visual(&action.description, desc_width)
        );
    }

    println!();
    println!("{} action(s) total", actions.len());
}

/// Print the outcome of the full pipeline.
pub fn print_outcome(outcome: &PipelineOutcome) {
    print_triage(&outcome.triage);

    let Some(generation) = &outcome.generation else {
        println!();
        println!(
            "{}",
            format!("No actions generated: insight is {}.", outcome.triage.triage_status).dimmed()
        );
        return;
    };

    println!();
    print_generation(generation);
    println!();
    print_actions_table(&outcome.actions);
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
