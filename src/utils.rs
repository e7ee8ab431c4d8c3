// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check a file name against allowed extensions, case-insensitively
pub fn has_allowed_extension(filename: &str, allowed: &[&str]) -> bool {
    get_file_extension(filename)
        .map(|ext| allowed.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn is_pdf_file_name(filename: &str) -> bool {
    has_allowed_extension(filename, &["pdf"])
}

/// Content type for an upload, by extension
pub fn content_type_for(filename: &str) -> Result<&'static str> {
    if is_pdf_file_name(filename) {
        Ok(PDF_CONTENT_TYPE)
    } else {
        anyhow::bail!("Unsupported file format: {}", filename)
    }
}

/// Render a score exactly as received: `82`, `72.25`, `74.999`
pub fn format_score(score: f64) -> String {
    score.to_string()
}

/// Read file content as string with proper error context
pub async fn read_file_content(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Read raw bytes with proper error context
pub async fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.pdf"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("Resume.PDF"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_is_pdf_file_name() {
        assert!(is_pdf_file_name("jane_doe.pdf"));
        assert!(is_pdf_file_name("JANE.Pdf"));
        assert!(!is_pdf_file_name("jane.docx"));
        assert!(!is_pdf_file_name("pdf"));
        assert!(!is_pdf_file_name("jane.pdf.txt"));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("cv.pdf").unwrap(), "application/pdf");
        assert!(content_type_for("cv.docx").is_err());
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(82.0), "82");
        assert_eq!(format_score(72.25), "72.25");
        assert_eq!(format_score(61.5), "61.5");
        assert_eq!(format_score(-3.5), "-3.5");
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(74.999), "74.999");
        assert_eq!(format_score(49.999), "49.999");
        assert_eq!(format_score(0.123456), "0.123456");
    }
}
