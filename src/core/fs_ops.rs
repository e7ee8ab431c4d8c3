// src/core/fs_ops.rs
//! File system helpers for resume folders and report output

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::utils::is_pdf_file_name;

pub struct FsOps;

impl FsOps {
    /// Ensure directory exists
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Ensure the parent directory of a file exists
    pub async fn ensure_parent_exists(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) => Self::ensure_dir_exists(parent).await,
            None => Ok(()),
        }
    }

    /// List the PDF files directly inside `dir`, sorted by file name
    pub async fn list_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        let mut pdfs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?
        {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if path.is_file() && is_pdf_file_name(name) {
                pdfs.push(path);
            } else {
                debug!("Skipping non-PDF entry: {}", path.display());
            }
        }

        pdfs.sort();
        Ok(pdfs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_pdf_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt"] {
            tokio::fs::write(dir.path().join(name), b"x").await.unwrap();
        }
        tokio::fs::create_dir(dir.path().join("nested.pdf")).await.unwrap();

        let files = FsOps::list_pdf_files(dir.path()).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FsOps::list_pdf_files(&dir.path().join("absent")).await.is_err());
    }

    #[tokio::test]
    async fn test_ensure_parent_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("reports").join("run.csv");
        FsOps::ensure_parent_exists(&file).await.unwrap();
        assert!(dir.path().join("reports").is_dir());
    }
}
