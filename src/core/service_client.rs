// src/core/service_client.rs
//! HTTP client for the remote analysis service - multipart upload in, JSON scores out

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, error, info, trace};

use crate::core::config_manager::ServiceConfig;
use crate::errors::ServiceError;
use crate::types::{AnalysisRequest, AnalysisResult, HealthResponse, ServiceErrorBody};
use crate::utils::content_type_for;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// The remote collaborator that turns a resume and a job description into scores.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ServiceError>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    analyze_url: String,
    health_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            analyze_url: config.analyze_url(),
            health_url: config.health_url(),
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    fn build_form(request: &AnalysisRequest) -> Result<Form, ServiceError> {
        let resume = request.resume();
        let content_type = content_type_for(&resume.file_name).map_err(|e| {
            ServiceError::Protocol {
                detail: e.to_string(),
            }
        })?;

        let part = Part::bytes(resume.bytes.clone())
            .file_name(resume.file_name.clone())
            .mime_str(content_type)?;

        Ok(Form::new()
            .part(RESUME_FIELD, part)
            .text(JOB_DESCRIPTION_FIELD, request.job_description().to_string()))
    }

    /// Check that the service answers `{"status": "ok"}`
    pub async fn health(&self) -> Result<HealthResponse, ServiceError> {
        trace!("Calling analysis service health check: {}", self.health_url);

        let response = self.client.get(&self.health_url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ServiceError::Protocol {
            detail: format!("invalid health response: {}", e),
        })
    }
}

#[async_trait]
impl AnalysisService for ServiceClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ServiceError> {
        let form = Self::build_form(request)?;

        info!(
            "Calling analysis service: {} (resume: {}, {} bytes)",
            self.analyze_url,
            request.resume().file_name,
            request.resume().size()
        );

        let response = self
            .client
            .post(&self.analyze_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        trace!("Response status: {}", status);

        let response_text = response.text().await?;
        debug!("Raw analysis service response: {}", response_text);

        if !status.is_success() {
            error!("Analysis service error response: {}", response_text);
            return Err(status_error(status.as_u16(), &response_text));
        }

        serde_json::from_str::<AnalysisResult>(&response_text).map_err(|e| {
            error!("Failed to parse analysis response: {}", e);
            ServiceError::Protocol {
                detail: e.to_string(),
            }
        })
    }
}

/// Prefer the service's `{"error": ...}` message, fall back to the raw body
fn status_error(status: u16, body: &str) -> ServiceError {
    let message = serde_json::from_str::<ServiceErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.trim().to_string()
            }
        });

    ServiceError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_prefers_error_field() {
        match status_error(400, r#"{"error": "Only PDF files allowed"}"#) {
            ServiceError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Only PDF files allowed");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_falls_back_to_body() {
        match status_error(502, "  Bad Gateway\n") {
            ServiceError::Status { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected error: {:?}", other),
        }

        match status_error(500, "") {
            ServiceError::Status { message, .. } => assert_eq!(message, "Unknown error"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
