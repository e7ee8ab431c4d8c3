// src/errors.rs
//! Error taxonomy: local validation failures, collaborator failures, submission rejections

use thiserror::Error;

/// Input problems caught before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Upload a resume PDF")]
    MissingResume,

    #[error("Only PDF files are accepted: {file_name}")]
    NotPdf { file_name: String },

    #[error("Resume file is empty: {file_name}")]
    EmptyResume { file_name: String },

    #[error("Resume is too large: {size_bytes} bytes (max {max_bytes})")]
    ResumeTooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("Paste a job description")]
    EmptyJobDescription,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingResume => "RESUME_MISSING",
            Self::NotPdf { .. } => "RESUME_NOT_PDF",
            Self::EmptyResume { .. } => "RESUME_EMPTY",
            Self::ResumeTooLarge { .. } => "RESUME_TOO_LARGE",
            Self::EmptyJobDescription => "JOB_DESCRIPTION_EMPTY",
        }
    }
}

/// Failures talking to the analysis service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Analysis service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Analysis service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Analysis service sent an unexpected payload: {detail}")]
    Protocol { detail: String },
}

/// How a collaborator failure is classified for diagnostics.
///
/// Users see the same notice for every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Protocol,
}

impl ServiceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            // a body that fails to decode surfaces from reqwest too
            Self::Transport(e) if e.is_decode() => FailureKind::Protocol,
            Self::Transport(_) => FailureKind::Transport,
            Self::Status { .. } | Self::Protocol { .. } => FailureKind::Protocol,
        }
    }
}

/// Why a submission did not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("An analysis is already running")]
    Busy,
}
