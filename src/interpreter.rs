// src/interpreter.rs
//! Composite score interpretation: final score -> confidence tier -> tone.
//!
//! Everything a tier implies (label, accent, heading, guidance) lives in
//! [`TIER_PROFILES`]. Callers look the profile up once and read fields from it.

use serde::Serialize;

use crate::types::AnalysisResult;

pub const STRONG_THRESHOLD: f64 = 75.0;
pub const MODERATE_THRESHOLD: f64 = 50.0;

/// Discrete confidence band. Ordered by severity: `Strong < Moderate < Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Strong,
    Moderate,
    Low,
}

/// Visual accent used for a tier badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Indigo,
    Amber,
    Rose,
}

impl Accent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Indigo => "indigo",
            Self::Amber => "amber",
            Self::Rose => "rose",
        }
    }

    /// Marker shown next to the label in plain-text output
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Indigo => "🟣",
            Self::Amber => "🟠",
            Self::Rose => "🔴",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TierProfile {
    pub tier: ConfidenceTier,
    pub label: &'static str,
    /// 0 is the calmest; higher means more urgent
    pub severity: u8,
    pub accent: Accent,
    pub heading: &'static str,
    pub guidance: &'static str,
}

pub static TIER_PROFILES: [TierProfile; 3] = [
    TierProfile {
        tier: ConfidenceTier::Strong,
        label: "Strong Match",
        severity: 0,
        accent: Accent::Indigo,
        heading: "Next Steps",
        guidance: "The profile demonstrates strong alignment across skills, intent, and role expectations.",
    },
    TierProfile {
        tier: ConfidenceTier::Moderate,
        label: "Moderate Match",
        severity: 1,
        accent: Accent::Amber,
        heading: "Improvement Suggestions",
        guidance: "The profile partially aligns with the role. Strengthening missing skills or clarifying experience could improve the match.",
    },
    TierProfile {
        tier: ConfidenceTier::Low,
        label: "Low Match",
        severity: 2,
        accent: Accent::Rose,
        heading: "Guidance",
        guidance: "The profile currently shows limited alignment with the role requirements. Consider reviewing required skills and role focus.",
    },
];

impl ConfidenceTier {
    /// Lower bounds are inclusive. NaN compares false everywhere and lands in `Low`.
    pub fn from_score(final_score: f64) -> Self {
        if final_score >= STRONG_THRESHOLD {
            Self::Strong
        } else if final_score >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn profile(self) -> &'static TierProfile {
        &TIER_PROFILES[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.profile().label
    }

    pub fn severity(self) -> u8 {
        self.profile().severity
    }
}

pub fn tier(final_score: f64) -> ConfidenceTier {
    ConfidenceTier::from_score(final_score)
}

/// Score plus the profile of its tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interpretation {
    pub final_score: f64,
    pub profile: &'static TierProfile,
}

impl Interpretation {
    pub fn tier(&self) -> ConfidenceTier {
        self.profile.tier
    }
}

pub fn interpret(result: &AnalysisResult) -> Interpretation {
    interpret_score(result.final_score)
}

pub fn interpret_score(final_score: f64) -> Interpretation {
    Interpretation {
        final_score,
        profile: tier(final_score).profile(),
    }
}
