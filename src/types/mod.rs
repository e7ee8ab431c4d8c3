// src/types/mod.rs
//! Wire and domain types shared by the client, the orchestrator and the presenter

pub mod request;
pub mod response;

pub use request::{AnalysisRequest, ResumeFile};
pub use response::{AnalysisResult, HealthResponse, ServiceErrorBody};
