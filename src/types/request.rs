// src/types/request.rs
//! Resume upload and the validated analysis request

use anyhow::Result;
use std::path::Path;

use crate::errors::ValidationError;
use crate::utils::{is_pdf_file_name, read_file_bytes};

/// Largest resume the analysis service accepts.
pub const MAX_RESUME_BYTES: u64 = 2 * 1024 * 1024;

/// A resume picked by the user: original file name plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Load a resume from disk, keeping only the file name part of the path
    pub async fn load(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid resume path: {}", path.display()))?
            .to_string();

        let bytes = read_file_bytes(path).await?;
        Ok(Self { file_name, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validate(&self, max_bytes: u64) -> Result<(), ValidationError> {
        if !is_pdf_file_name(&self.file_name) {
            return Err(ValidationError::NotPdf {
                file_name: self.file_name.clone(),
            });
        }

        if self.bytes.is_empty() {
            return Err(ValidationError::EmptyResume {
                file_name: self.file_name.clone(),
            });
        }

        if self.size() > max_bytes {
            return Err(ValidationError::ResumeTooLarge {
                size_bytes: self.size(),
                max_bytes,
            });
        }

        Ok(())
    }
}

/// A request that passed validation and can go on the wire.
///
/// The only way to get one is [`AnalysisRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    resume: ResumeFile,
    job_description: String,
}

impl AnalysisRequest {
    pub fn new(
        resume: Option<ResumeFile>,
        job_description: &str,
        max_resume_bytes: u64,
    ) -> Result<Self, ValidationError> {
        let resume = resume.ok_or(ValidationError::MissingResume)?;

        if job_description.trim().is_empty() {
            return Err(ValidationError::EmptyJobDescription);
        }

        resume.validate(max_resume_bytes)?;

        Ok(Self {
            resume,
            job_description: job_description.to_string(),
        })
    }

    pub fn resume(&self) -> &ResumeFile {
        &self.resume
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }
}
