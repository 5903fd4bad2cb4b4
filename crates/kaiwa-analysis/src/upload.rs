//! Upload validation, ahead of any decoding.

use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};

/// Accepted container formats.
pub const SUPPORTED_FORMATS: [&str; 3] = ["mp3", "wav", "m4a"];

/// Maximum accepted file size.
pub const MAX_FILE_SIZE_MB: u64 = 100;

/// Reject unsupported or oversized files before decoding starts.
pub fn validate_upload(path: &Path) -> AnalysisResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AnalysisError::InvalidUpload(format!(
            "unsupported extension '{}', expected one of {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_FILE_SIZE_MB * 1024 * 1024 {
        return Err(AnalysisError::InvalidUpload(format!(
            "file is {:.1} MB, limit is {} MB",
            metadata.len() as f64 / (1024.0 * 1024.0),
            MAX_FILE_SIZE_MB
        )));
    }

    Ok(())
}
