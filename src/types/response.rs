// src/types/response.rs
//! Response payloads of the analysis service

use serde::{Deserialize, Serialize};

// ===== Analysis Response =====

/// Composite match result returned by the analysis service.
///
/// Scores are on a 0–100 scale. They are taken as delivered: nothing in the
/// client clamps or re-validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub final_score: f64,
    pub skill_match_score: f64,
    pub semantic_similarity: f64,
    pub role_alignment_score: f64,
    pub experience_score: f64,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

// ===== Auxiliary Responses =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Body the service sends alongside a 4xx, e.g. `{"error": "Only PDF files allowed"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_lists_are_optional() {
        let json = r#"{
            "final_score": 61.5,
            "skill_match_score": 50,
            "semantic_similarity": 72.25,
            "role_alignment_score": 100,
            "experience_score": 20,
            "recommendations": ["Add Docker to your projects"]
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.final_score, 61.5);
        assert_eq!(result.skill_match_score, 50.0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_missing_score_is_rejected() {
        let json = r#"{
            "final_score": 61.5,
            "semantic_similarity": 72.25,
            "role_alignment_score": 100,
            "experience_score": 20,
            "recommendations": []
        }"#;

        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_health_status() {
        let health: HealthResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(health.is_ok());

        let health: HealthResponse = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert!(!health.is_ok());
    }
}
