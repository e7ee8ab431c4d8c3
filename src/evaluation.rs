// src/evaluation.rs
//! Offline ranking evaluation: score a folder of resumes against one job
//! description and measure Precision@K, Recall@K and F1@K.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

use crate::core::{AnalysisService, FsOps};
use crate::errors::ValidationError;
use crate::types::{AnalysisRequest, ResumeFile};

pub const DEFAULT_K: usize = 5;
/// On the service's 0–100 scale
pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResume {
    pub rank: usize,
    pub file_name: String,
    pub final_score: f64,
    pub relevant: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub k: usize,
    pub threshold: f64,
    pub ranking: Vec<RankedResume>,
    /// Resumes that were not scored
    pub skipped: Vec<String>,
    pub precision_at_k: f64,
    pub recall_at_k: f64,
    pub f1_at_k: f64,
    pub generated_at: DateTime<Utc>,
}

/// Rank scored resumes and compute the metrics. Ties keep input order.
pub fn evaluate_scores(scores: Vec<(String, f64)>, k: usize, threshold: f64) -> EvaluationReport {
    let mut scores = scores;
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    let ranking: Vec<RankedResume> = scores
        .into_iter()
        .enumerate()
        .map(|(i, (file_name, final_score))| RankedResume {
            rank: i + 1,
            file_name,
            final_score,
            relevant: final_score >= threshold,
        })
        .collect();

    let relevant_total = ranking.iter().filter(|r| r.relevant).count();
    let relevant_in_top_k = ranking.iter().take(k).filter(|r| r.relevant).count();

    let precision_at_k = ratio(relevant_in_top_k, k);
    let recall_at_k = ratio(relevant_in_top_k, relevant_total);
    let f1_at_k = if precision_at_k + recall_at_k > 0.0 {
        2.0 * precision_at_k * recall_at_k / (precision_at_k + recall_at_k)
    } else {
        0.0
    };

    EvaluationReport {
        k,
        threshold,
        ranking,
        skipped: Vec::new(),
        precision_at_k,
        recall_at_k,
        f1_at_k,
        generated_at: Utc::now(),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Score every PDF in `dir` one at a time, then rank them.
///
/// Files that cannot be read, break the upload limits or fail analysis are
/// logged and listed in `skipped`.
pub async fn evaluate_directory<S>(
    service: &S,
    dir: &Path,
    job_description: &str,
    k: usize,
    threshold: f64,
    max_resume_bytes: u64,
) -> Result<EvaluationReport>
where
    S: AnalysisService + ?Sized,
{
    let files = FsOps::list_pdf_files(dir).await?;
    info!("Evaluating {} resumes from {}", files.len(), dir.display());

    let mut scores = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();

    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let resume = match load_within_limit(&path, max_resume_bytes).await {
            Ok(resume) => resume,
            Err(e) => {
                warn!("Skipping {}: {:#}", file_name, e);
                skipped.push(file_name);
                continue;
            }
        };

        let request = match AnalysisRequest::new(Some(resume), job_description, max_resume_bytes)
        {
            Ok(request) => request,
            Err(e) => {
                warn!("Skipping {}: {}", file_name, e);
                skipped.push(file_name);
                continue;
            }
        };

        match service.analyze(&request).await {
            Ok(result) => {
                info!("Scored {}: {}", file_name, result.final_score);
                scores.push((file_name, result.final_score));
            }
            Err(e) => {
                warn!("Analysis failed for {}: {}", file_name, e);
                skipped.push(file_name);
            }
        }
    }

    let mut report = evaluate_scores(scores, k, threshold);
    report.skipped = skipped;
    Ok(report)
}

/// Check the size on disk before pulling the file into memory
async fn load_within_limit(path: &Path, max_resume_bytes: u64) -> Result<ResumeFile> {
    let size_bytes = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?
        .len();

    if size_bytes > max_resume_bytes {
        return Err(ValidationError::ResumeTooLarge {
            size_bytes,
            max_bytes: max_resume_bytes,
        }
        .into());
    }

    ResumeFile::load(path).await
}

/// Write the ranking as `rank,file_name,final_score,relevant`
pub fn write_csv(report: &EvaluationReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    for entry in &report.ranking {
        writer
            .serialize(entry)
            .with_context(|| format!("Failed to write CSV row for {}", entry.file_name))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {}", path.display()))?;
    info!("Wrote evaluation ranking to {}", path.display());
    Ok(())
}
