// src/orchestrator.rs
//! Request lifecycle for one analysis session.
//!
//! ```text
//! Idle --edit--> AwaitingInput --begin--> InFlight --complete--> Succeeded | Failed
//!                                            ^                        |
//!                                            +--------begin-----------+
//! ```
//!
//! `begin` is refused while a request is in flight. Every accepted request
//! gets a ticket with a fresh sequence number, and `complete` only applies
//! the outcome of the latest ticket.

use serde::Serialize;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::core::AnalysisService;
use crate::errors::{FailureKind, ServiceError, SubmitError, ValidationError};
use crate::presenter::{present, Presentation};
use crate::types::request::MAX_RESUME_BYTES;
use crate::types::{AnalysisRequest, AnalysisResult, ResumeFile};

/// The only failure text a user ever sees for a collaborator problem.
pub const FAILURE_NOTICE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    Idle,
    AwaitingInput,
    InFlight { sequence: u64 },
    Succeeded { result: AnalysisResult },
    Failed { kind: FailureKind },
}

impl RequestState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingInput => "awaiting_input",
            Self::InFlight { .. } => "in_flight",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Identifies one accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub sequence: u64,
    pub request_id: Uuid,
}

/// What `complete` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Discarded,
}

/// A message for the user, shown inline next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Validation(ValidationError),
    Failure,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Failure => FAILURE_NOTICE.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct Draft {
    resume: Option<ResumeFile>,
    job_description: String,
}

#[derive(Debug)]
pub struct Orchestrator {
    state: RequestState,
    draft: Draft,
    notice: Option<Notice>,
    last_issued: u64,
    max_resume_bytes: u64,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(MAX_RESUME_BYTES)
    }
}

impl Orchestrator {
    pub fn new(max_resume_bytes: u64) -> Self {
        Self {
            state: RequestState::Idle,
            draft: Draft::default(),
            notice: None,
            last_issued: 0,
            max_resume_bytes,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, RequestState::InFlight { .. })
    }

    /// The result on display, if the last applied request succeeded
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            RequestState::Succeeded { result } => Some(result),
            _ => None,
        }
    }

    pub fn presentation(&self) -> Option<Presentation> {
        self.result().map(present)
    }

    // ===== Draft editing =====

    pub fn select_resume(&mut self, resume: ResumeFile) {
        self.draft.resume = Some(resume);
        self.input_changed();
    }

    pub fn clear_resume(&mut self) {
        self.draft.resume = None;
        self.input_changed();
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.draft.job_description = text.into();
        self.input_changed();
    }

    /// Editing never hides a result that is already on screen
    fn input_changed(&mut self) {
        if self.state == RequestState::Idle {
            self.state = RequestState::AwaitingInput;
        }
    }

    // ===== Lifecycle =====

    /// Validate the draft and move to `InFlight`.
    ///
    /// On error the state is untouched; a validation failure leaves a notice.
    pub fn begin(&mut self) -> Result<(Ticket, AnalysisRequest), SubmitError> {
        if self.is_busy() {
            warn!("Submission rejected: request {} still in flight", self.last_issued);
            return Err(SubmitError::Busy);
        }

        let request = match AnalysisRequest::new(
            self.draft.resume.clone(),
            &self.draft.job_description,
            self.max_resume_bytes,
        ) {
            Ok(request) => request,
            Err(e) => {
                info!("Submission blocked by validation: {} ({})", e, e.code());
                self.notice = Some(Notice::Validation(e.clone()));
                return Err(e.into());
            }
        };

        self.last_issued += 1;
        let ticket = Ticket {
            sequence: self.last_issued,
            request_id: Uuid::new_v4(),
        };

        // InFlight carries no result, so the previous one is gone from here on
        self.state = RequestState::InFlight {
            sequence: ticket.sequence,
        };
        self.notice = None;

        info!(
            "Analysis request {} started (sequence {})",
            ticket.request_id, ticket.sequence
        );
        Ok((ticket, request))
    }

    /// Apply a collaborator outcome if `ticket` is the latest in-flight request
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, ServiceError>,
    ) -> Completion {
        let current = matches!(
            self.state,
            RequestState::InFlight { sequence } if sequence == ticket.sequence
        );

        if ticket.sequence != self.last_issued || !current {
            warn!(
                "Discarding stale outcome of request {} (sequence {}, latest {})",
                ticket.request_id, ticket.sequence, self.last_issued
            );
            return Completion::Discarded;
        }

        match outcome {
            Ok(result) => {
                info!(
                    "Analysis request {} succeeded with final score {}",
                    ticket.request_id, result.final_score
                );
                self.state = RequestState::Succeeded { result };
            }
            Err(e) => {
                let kind = e.kind();
                error!(
                    "Analysis request {} failed ({:?}): {}",
                    ticket.request_id, kind, e
                );
                self.state = RequestState::Failed { kind };
                self.notice = Some(Notice::Failure);
            }
        }

        Completion::Applied
    }

    /// Run the draft through the service and apply the outcome
    pub async fn submit<S>(&mut self, service: &S) -> Result<Completion, SubmitError>
    where
        S: AnalysisService + ?Sized,
    {
        let (ticket, request) = self.begin()?;

        let span = info_span!(
            "analysis_request",
            request_id = %ticket.request_id,
            sequence = ticket.sequence
        );
        let outcome = service.analyze(&request).instrument(span).await;

        Ok(self.complete(ticket, outcome))
    }

    /// Replace the draft with the given inputs, then submit
    pub async fn submit_input<S>(
        &mut self,
        service: &S,
        resume: Option<ResumeFile>,
        job_description: &str,
    ) -> Result<Completion, SubmitError>
    where
        S: AnalysisService + ?Sized,
    {
        match resume {
            Some(resume) => self.select_resume(resume),
            None => self.clear_resume(),
        }
        self.set_job_description(job_description);
        self.submit(service).await
    }
}
