// src/presenter.rs
//! Explainability views derived from one analysis result.
//!
//! Two things here look alike and must stay apart: the signal cards show
//! what this request measured, while the contribution chart shows the
//! nominal weighting scheme and never reads the result.

use serde::Serialize;

use crate::interpreter::{interpret, Accent, ConfidenceTier};
use crate::types::AnalysisResult;

pub const EXPLAINABILITY_HEADING: &str = "Why this score?";
pub const EXPLAINABILITY_INTRO: &str =
    "Skill coverage reflects how well the resume satisfies explicitly stated role requirements.";
pub const CHART_HEADING: &str = "Score Contribution Breakdown";
pub const CHART_INTRO: &str = "This chart shows how different evaluation signals contribute to the final match score. Keyword matching captures explicit skills, while semantic matching captures contextual alignment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    SkillMatch,
    SemanticSimilarity,
    RoleAlignment,
    ExperienceSignal,
}

impl Signal {
    pub const ALL: [Signal; 4] = [
        Signal::SkillMatch,
        Signal::SemanticSimilarity,
        Signal::RoleAlignment,
        Signal::ExperienceSignal,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::SkillMatch => "Skill Match",
            Self::SemanticSimilarity => "Semantic Similarity",
            Self::RoleAlignment => "Role Alignment",
            Self::ExperienceSignal => "Experience Signal",
        }
    }

    /// What the signal measures. Static text, not derived from data.
    pub fn definition(&self) -> &'static str {
        match self {
            Self::SkillMatch => {
                "Exact overlap between required skills in the job description and the resume"
            }
            Self::SemanticSimilarity => {
                "Contextual similarity using sentence embeddings, beyond exact keywords"
            }
            Self::RoleAlignment => {
                "Alignment between resume focus and role intent (intern, developer, engineer, etc.)"
            }
            Self::ExperienceSignal => "Estimated experience depth inferred from resume signals",
        }
    }

    /// Label of the signal's bar in the contribution chart
    pub fn chart_label(&self) -> &'static str {
        match self {
            Self::SkillMatch => "Keyword Match",
            Self::SemanticSimilarity => "Semantic Match",
            Self::RoleAlignment => "Role Alignment",
            Self::ExperienceSignal => "Experience Signal",
        }
    }

    /// Declared share of the composite score, in percent
    pub fn nominal_weight(&self) -> u8 {
        match self {
            Self::SkillMatch => 40,
            Self::SemanticSimilarity => 30,
            Self::RoleAlignment => 20,
            Self::ExperienceSignal => 10,
        }
    }

    pub fn score_in(&self, result: &AnalysisResult) -> f64 {
        match self {
            Self::SkillMatch => result.skill_match_score,
            Self::SemanticSimilarity => result.semantic_similarity,
            Self::RoleAlignment => result.role_alignment_score,
            Self::ExperienceSignal => result.experience_score,
        }
    }
}

// ===== View Models =====

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreHeadline {
    pub final_score: f64,
    pub tier: ConfidenceTier,
    pub label: &'static str,
    pub accent: Accent,
    pub guidance: &'static str,
    /// Width of the score bar in percent. Equal to the raw score, unclamped.
    pub fill_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalCard {
    pub signal: Signal,
    pub title: &'static str,
    pub value: f64,
    pub definition: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionBar {
    pub label: &'static str,
    pub weight: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationList {
    pub heading: &'static str,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCoverage {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl SkillCoverage {
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty() && self.missing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub headline: ScoreHeadline,
    pub cards: Vec<SignalCard>,
    pub contribution_chart: Vec<ContributionBar>,
    pub recommendations: RecommendationList,
    pub skill_coverage: SkillCoverage,
}

// ===== Builders =====

pub fn signal_cards(result: &AnalysisResult) -> Vec<SignalCard> {
    Signal::ALL
        .iter()
        .map(|signal| SignalCard {
            signal: *signal,
            title: signal.title(),
            value: signal.score_in(result),
            definition: signal.definition(),
        })
        .collect()
}

/// Nominal weights, 40/30/20/10. Takes no result on purpose.
pub fn contribution_chart() -> Vec<ContributionBar> {
    Signal::ALL
        .iter()
        .map(|signal| ContributionBar {
            label: signal.chart_label(),
            weight: signal.nominal_weight(),
        })
        .collect()
}

pub fn present(result: &AnalysisResult) -> Presentation {
    let interpretation = interpret(result);
    let profile = interpretation.profile;

    Presentation {
        headline: ScoreHeadline {
            final_score: interpretation.final_score,
            tier: profile.tier,
            label: profile.label,
            accent: profile.accent,
            guidance: profile.guidance,
            fill_percent: interpretation.final_score,
        },
        cards: signal_cards(result),
        contribution_chart: contribution_chart(),
        recommendations: RecommendationList {
            heading: profile.heading,
            items: result.recommendations.clone(),
        },
        skill_coverage: SkillCoverage {
            matched: result.matched_skills.clone(),
            missing: result.missing_skills.clone(),
        },
    }
}
