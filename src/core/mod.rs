// src/core/mod.rs
//! Core services: configuration, file system access, the analysis service client

pub mod config_manager;
pub mod fs_ops;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
pub use service_client::{AnalysisService, ServiceClient};
