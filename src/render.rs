// src/render.rs
//! Plain-text and JSON rendering of presentations and evaluation reports

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;

use crate::evaluation::EvaluationReport;
use crate::presenter::{
    Presentation, CHART_HEADING, CHART_INTRO, EXPLAINABILITY_HEADING, EXPLAINABILITY_INTRO,
};
use crate::utils::format_score;

const SCORE_BAR_CELLS: usize = 30;
/// Cells for a 100% bar in the contribution chart
const CHART_CELLS: usize = 40;

/// Number of filled cells for `percent` on a track of `cells`.
///
/// The value itself is never clamped upstream; only the drawing stops at the track ends.
pub fn filled_cells(percent: f64, cells: usize) -> usize {
    if !percent.is_finite() || percent <= 0.0 {
        return 0;
    }
    let filled = (percent / 100.0 * cells as f64).round() as usize;
    filled.min(cells)
}

fn bar(percent: f64, cells: usize) -> String {
    let filled = filled_cells(percent, cells);
    format!("{}{}", "█".repeat(filled), "░".repeat(cells - filled))
}

pub struct PresentationText<'a>(pub &'a Presentation);

impl fmt::Display for PresentationText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;
        let headline = &p.headline;

        writeln!(
            f,
            "Final Match Score: {}%  {} {}",
            format_score(headline.final_score),
            headline.accent.marker(),
            headline.label
        )?;
        writeln!(f, "[{}]", bar(headline.fill_percent, SCORE_BAR_CELLS))?;
        writeln!(f, "{}", headline.guidance)?;

        writeln!(f)?;
        writeln!(f, "{}", EXPLAINABILITY_HEADING)?;
        writeln!(f, "{}", EXPLAINABILITY_INTRO)?;
        for card in &p.cards {
            writeln!(f, "  {:<22}{:>7}%", card.title, format_score(card.value))?;
            writeln!(f, "    ⓘ {}", card.definition)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", CHART_HEADING)?;
        writeln!(f, "{}", CHART_INTRO)?;
        for entry in &p.contribution_chart {
            writeln!(
                f,
                "  {:<20}{} {}%",
                entry.label,
                "█".repeat(filled_cells(entry.weight as f64, CHART_CELLS)),
                entry.weight
            )?;
        }

        if !p.skill_coverage.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skill coverage")?;
            writeln!(f, "  Matched: {}", join_or_none(&p.skill_coverage.matched))?;
            writeln!(f, "  Missing: {}", join_or_none(&p.skill_coverage.missing))?;
        }

        writeln!(f)?;
        writeln!(f, "{}", p.recommendations.heading)?;
        for item in &p.recommendations.items {
            writeln!(f, "  • {}", item)?;
        }

        Ok(())
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub fn render_text(presentation: &Presentation) -> String {
    PresentationText(presentation).to_string()
}

pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}

pub struct EvaluationText<'a>(pub &'a EvaluationReport);

impl fmt::Display for EvaluationText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(
            f,
            "Ranking ({} resumes, relevance threshold {}%)",
            report.ranking.len(),
            format_score(report.threshold)
        )?;
        for entry in &report.ranking {
            writeln!(
                f,
                "  {:>3}. {:<40}{:>7}%  {}",
                entry.rank,
                entry.file_name,
                format_score(entry.final_score),
                if entry.relevant { "relevant" } else { "-" }
            )?;
        }
        if !report.skipped.is_empty() {
            writeln!(f, "Skipped: {}", report.skipped.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "Precision@{}: {:.2}", report.k, report.precision_at_k)?;
        writeln!(f, "Recall@{}: {:.2}", report.k, report.recall_at_k)?;
        writeln!(f, "F1@{}: {:.2}", report.k, report.f1_at_k)
    }
}

pub fn render_evaluation_text(report: &EvaluationReport) -> String {
    EvaluationText(report).to_string()
}
