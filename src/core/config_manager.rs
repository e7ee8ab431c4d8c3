// src/core/config_manager.rs
//! Layered configuration: defaults, then `profileiq.yaml`, then environment, then CLI flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::types::request::MAX_RESUME_BYTES;

pub const CONFIG_FILE_NAME: &str = "profileiq.yaml";

const DEFAULT_SERVICE_URL: &str = "http://localhost:5002";
const DEFAULT_ANALYZE_ENDPOINT: &str = "/api/analyze-resume";
const DEFAULT_HEALTH_ENDPOINT: &str = "/health";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LOG_FILE: &str = "/tmp/profileiq.log";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub analyze_endpoint: String,
    pub health_endpoint: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub max_resume_bytes: u64,
}

/// One environment section of `profileiq.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct EnvironmentSection {
    service_url: Option<String>,
    analyze_endpoint: Option<String>,
    health_endpoint: Option<String>,
    timeout_seconds: Option<u64>,
    log_file: Option<PathBuf>,
    max_resume_bytes: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<EnvironmentSection>,
    #[serde(default)]
    production: Option<EnvironmentSection>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            analyze_endpoint: DEFAULT_ANALYZE_ENDPOINT.to_string(),
            health_endpoint: DEFAULT_HEALTH_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_resume_bytes: MAX_RESUME_BYTES,
        }
    }
}

impl ServiceConfig {
    pub fn analyze_url(&self) -> String {
        join_url(&self.base_url, &self.analyze_endpoint)
    }

    pub fn health_url(&self) -> String {
        join_url(&self.base_url, &self.health_endpoint)
    }
}

fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

impl ConfigManager {
    /// Load configuration from the working directory and process environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        let config_path = Path::new(CONFIG_FILE_NAME);

        let file_content = if config_path.exists() {
            Some(
                std::fs::read_to_string(config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?,
            )
        } else {
            None
        };

        Self::from_sources(&environment, file_content.as_deref(), |key| {
            std::env::var(key).ok()
        })
    }

    fn get_environment() -> String {
        std::env::var("PROFILEIQ_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Build a configuration from explicit sources. `lookup` plays the role of the environment.
    pub fn from_sources<F>(environment: &str, file_content: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            environment: environment.to_string(),
            service: ServiceConfig::default(),
            logging: LoggingConfig::default(),
            upload: UploadConfig::default(),
        };

        if let Some(content) = file_content {
            let file: ConfigFile = serde_yaml::from_str(content)
                .with_context(|| format!("Failed to parse {}", CONFIG_FILE_NAME))?;

            let section = match environment {
                "production" => file.production,
                _ => file.local,
            };

            if let Some(section) = section {
                config.apply_section(section);
            }
        }

        config.apply_env(lookup)?;
        Ok(config)
    }

    fn apply_section(&mut self, section: EnvironmentSection) {
        if let Some(url) = section.service_url {
            self.service.base_url = url;
        }
        if let Some(endpoint) = section.analyze_endpoint {
            self.service.analyze_endpoint = endpoint;
        }
        if let Some(endpoint) = section.health_endpoint {
            self.service.health_endpoint = endpoint;
        }
        if let Some(timeout) = section.timeout_seconds {
            self.service.timeout_seconds = timeout;
        }
        if let Some(log_file) = section.log_file {
            self.logging.log_file = log_file;
        }
        if let Some(max) = section.max_resume_bytes {
            self.upload.max_resume_bytes = max;
        }
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PROFILEIQ_SERVICE_URL") {
            self.service.base_url = url;
        }

        if let Some(timeout) = lookup("PROFILEIQ_TIMEOUT_SECS") {
            self.service.timeout_seconds = timeout
                .trim()
                .parse()
                .with_context(|| format!("PROFILEIQ_TIMEOUT_SECS must be a number of seconds, got '{}'", timeout))?;
        }

        if let Some(log_file) = lookup("PROFILEIQ_LOG_FILE") {
            self.logging.log_file = PathBuf::from(log_file);
        }

        Ok(())
    }

    pub fn with_service_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.service.base_url = url;
        }
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        if let Some(timeout) = timeout_seconds {
            self.service.timeout_seconds = timeout;
        }
        self
    }

    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        if let Some(path) = log_file {
            self.logging.log_file = path;
        }
        self
    }

    /// Loading runs before logging is set up, so the outcome is logged afterwards
    pub fn log_summary(&self) {
        info!("Environment: {}", self.environment);
        info!("Analysis service: {}", self.service.analyze_url());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = ConfigManager::from_sources("local", None, no_env).unwrap();
        assert_eq!(config.service, ServiceConfig::default());
        assert_eq!(
            config.service.analyze_url(),
            "http://localhost:5002/api/analyze-resume"
        );
        assert_eq!(config.service.health_url(), "http://localhost:5002/health");
        assert_eq!(config.upload.max_resume_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_file_section_by_environment() {
        let yaml = r#"
local:
  service_url: http://127.0.0.1:9000/
production:
  service_url: https://match.example.com
  analyze_endpoint: /analyze
  timeout_seconds: 15
  log_file: /var/log/profileiq.log
"#;

        let local = ConfigManager::from_sources("local", Some(yaml), no_env).unwrap();
        assert_eq!(
            local.service.analyze_url(),
            "http://127.0.0.1:9000/api/analyze-resume"
        );

        let prod = ConfigManager::from_sources("production", Some(yaml), no_env).unwrap();
        assert_eq!(prod.service.analyze_url(), "https://match.example.com/analyze");
        assert_eq!(prod.service.timeout_seconds, 15);
        assert_eq!(prod.logging.log_file, PathBuf::from("/var/log/profileiq.log"));
    }

    #[test]
    fn test_env_overrides_file() {
        let yaml = "local:\n  service_url: http://from-file:1\n";
        let env: HashMap<&str, &str> = [
            ("PROFILEIQ_SERVICE_URL", "http://from-env:2"),
            ("PROFILEIQ_TIMEOUT_SECS", " 5 "),
        ]
        .into_iter()
        .collect();

        let config = ConfigManager::from_sources("local", Some(yaml), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.service.base_url, "http://from-env:2");
        assert_eq!(config.service.timeout_seconds, 5);
    }

    #[test]
    fn test_bad_timeout_is_an_error() {
        let result = ConfigManager::from_sources("local", None, |key| {
            (key == "PROFILEIQ_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = ConfigManager::from_sources("local", None, no_env)
            .unwrap()
            .with_service_url(Some("http://cli:3".to_string()))
            .with_timeout(None)
            .with_log_file(Some(PathBuf::from("run.log")));

        assert_eq!(config.service.base_url, "http://cli:3");
        assert_eq!(config.service.timeout_seconds, 60);
        assert_eq!(config.logging.log_file, PathBuf::from("run.log"));
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    #[test]
    fn test_environment_is_logged_only_on_summary() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let config = ConfigManager::from_sources("production", None, no_env).unwrap();
            assert!(captured.text().is_empty());

            config.log_summary();
        });

        let text = captured.text();
        assert!(text.contains("Environment: production"));
        assert!(text.contains("http://localhost:5002/api/analyze-resume"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(ConfigManager::from_sources("local", Some("local: [1, 2"), no_env).is_err());
    }
}
