// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use crate::core::{AnalysisService, ConfigManager, FsOps, ServiceClient};
use crate::errors::{SubmitError, ValidationError};
use crate::evaluation::{
    evaluate_directory, write_csv, DEFAULT_K, DEFAULT_RELEVANCE_THRESHOLD,
};
use crate::orchestrator::{Orchestrator, FAILURE_NOTICE};
use crate::render::{render_evaluation_text, render_json, render_text};
use crate::types::ResumeFile;
use crate::utils::read_file_content;

/// Exit code for input rejected before anything was sent
const EXIT_INVALID_INPUT: u8 = 2;

#[derive(Parser)]
#[command(name = "profileiq")]
#[command(about = "Score how well a resume matches a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the analysis service
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Where to write JSON logs
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze one resume against a job description
    Analyze {
        /// Resume to upload (PDF only)
        #[arg(long)]
        resume: PathBuf,

        #[command(flatten)]
        job: JobDescriptionArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check that the analysis service is reachable
    Health,
    /// Rank a folder of resumes and report Precision@K, Recall@K and F1@K
    Evaluate {
        #[arg(long)]
        resumes_dir: PathBuf,

        #[arg(long)]
        job_description_file: PathBuf,

        #[arg(short = 'k', long = "top-k", default_value_t = DEFAULT_K)]
        top_k: usize,

        /// Minimum final score counted as relevant
        #[arg(long, default_value_t = DEFAULT_RELEVANCE_THRESHOLD)]
        threshold: f64,

        /// Also write the ranking to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct JobDescriptionArgs {
    /// Job description text
    #[arg(long)]
    pub job_description: Option<String>,

    /// File holding the job description
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,
}

impl JobDescriptionArgs {
    pub async fn resolve(&self) -> Result<String> {
        match (&self.job_description, &self.job_description_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => read_file_content(path).await,
            (None, None) => Ok(String::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Apply CLI overrides on top of file and environment configuration
    pub fn config(&self) -> Result<ConfigManager> {
        Ok(ConfigManager::load()?
            .with_service_url(self.service_url.clone())
            .with_timeout(self.timeout)
            .with_log_file(self.log_file.clone()))
    }
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<ExitCode> {
    let client = ServiceClient::new(&config.service)?;

    match cli.command {
        Command::Analyze {
            resume,
            job,
            format,
        } => {
            let resume = ResumeFile::load(&resume).await?;
            let job_description = job.resolve().await?;
            let mut orchestrator = Orchestrator::new(config.upload.max_resume_bytes);
            let outcome = run_analysis(
                &mut orchestrator,
                &client,
                resume,
                &job_description,
                format,
                &mut std::io::stdout(),
            )
            .await?;
            Ok(outcome.exit_code())
        }

        Command::Health => match client.health().await {
            Ok(health) if health.is_ok() => {
                println!("✅ Analysis service is up: {}", config.service.health_url());
                Ok(ExitCode::SUCCESS)
            }
            Ok(health) => {
                println!("❌ Analysis service reports status '{}'", health.status);
                Ok(ExitCode::FAILURE)
            }
            Err(e) => {
                error!("Health check failed: {}", e);
                println!("❌ Analysis service unreachable: {}", config.service.health_url());
                Ok(ExitCode::FAILURE)
            }
        },

        Command::Evaluate {
            resumes_dir,
            job_description_file,
            top_k,
            threshold,
            csv,
            format,
        } => {
            let job_description = read_file_content(&job_description_file).await?;
            if job_description.trim().is_empty() {
                let message = ValidationError::EmptyJobDescription.to_string();
                write_notice(&mut std::io::stdout(), format, "⚠️ ", &message)?;
                return Ok(ExitCode::from(EXIT_INVALID_INPUT));
            }

            let report = evaluate_directory(
                &client,
                &resumes_dir,
                &job_description,
                top_k,
                threshold,
                config.upload.max_resume_bytes,
            )
            .await
            .with_context(|| format!("Failed to evaluate {}", resumes_dir.display()))?;

            if let Some(path) = csv {
                FsOps::ensure_parent_exists(&path).await?;
                write_csv(&report, &path)?;
            }

            match format {
                OutputFormat::Text => print!("{}", render_evaluation_text(&report)),
                OutputFormat::Json => println!("{}", render_json(&report)?),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// How a single `analyze` run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Rendered,
    InvalidInput,
    Failed,
}

impl AnalysisOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Rendered => ExitCode::SUCCESS,
            Self::InvalidInput => ExitCode::from(EXIT_INVALID_INPUT),
            Self::Failed => ExitCode::FAILURE,
        }
    }
}

/// Notices share one shape per format: a marked line, or `{"error": ...}`
fn write_notice<W: Write>(
    out: &mut W,
    format: OutputFormat,
    marker: &str,
    message: &str,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{} {}", marker, message)?,
        OutputFormat::Json => {
            writeln!(out, "{}", render_json(&serde_json::json!({ "error": message }))?)?
        }
    }
    Ok(())
}

/// One pass through the orchestrator, writing whatever the user should see to `out`
pub async fn run_analysis<S, W>(
    orchestrator: &mut Orchestrator,
    service: &S,
    resume: ResumeFile,
    job_description: &str,
    format: OutputFormat,
    out: &mut W,
) -> Result<AnalysisOutcome>
where
    S: AnalysisService + ?Sized,
    W: Write,
{
    orchestrator.select_resume(resume);
    orchestrator.set_job_description(job_description);

    let (ticket, request) = match orchestrator.begin() {
        Ok(started) => started,
        Err(SubmitError::Validation(e)) => {
            write_notice(out, format, "⚠️ ", &e.to_string())?;
            return Ok(AnalysisOutcome::InvalidInput);
        }
        Err(SubmitError::Busy) => anyhow::bail!("An analysis is already running"),
    };

    eprintln!("Analyzing...");
    let outcome = service.analyze(&request).await;
    orchestrator.complete(ticket, outcome);

    match orchestrator.presentation() {
        Some(presentation) => {
            info!("Rendering result for request {}", ticket.request_id);
            match format {
                OutputFormat::Text => write!(out, "{}", render_text(&presentation))?,
                OutputFormat::Json => writeln!(out, "{}", render_json(&presentation)?)?,
            }
            Ok(AnalysisOutcome::Rendered)
        }
        None => {
            let message = orchestrator
                .notice()
                .map(|n| n.message())
                .unwrap_or_else(|| FAILURE_NOTICE.to_string());
            write_notice(out, format, "❌", &message)?;
            Ok(AnalysisOutcome::Failed)
        }
    }
}
