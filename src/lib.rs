//! ProfileIQ Match client.
//!
//! Sends a resume and a job description to the analysis service, then turns
//! the returned scores into a confidence tier and an explainable breakdown.

pub mod cli;
pub mod core;
pub mod errors;
pub mod evaluation;
pub mod interpreter;
pub mod orchestrator;
pub mod presenter;
pub mod render;
pub mod types;
pub mod utils;

pub use crate::core::{AnalysisService, ConfigManager, ServiceClient};
pub use errors::{FailureKind, ServiceError, SubmitError, ValidationError};
pub use interpreter::{interpret, tier, ConfidenceTier, Interpretation, TierProfile};
pub use orchestrator::{Completion, Notice, Orchestrator, RequestState, Ticket};
pub use presenter::{present, Presentation};
pub use types::{AnalysisRequest, AnalysisResult, ResumeFile};
