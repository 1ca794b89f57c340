//! Attachment uploads written to a local directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest accepted file, in bytes
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Content types accepted for attachments
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

pub const FILE_TOO_LARGE: &str = "File size should be less than 5MB";
pub const FILE_TYPE_NOT_ALLOWED: &str = "File type should be JPEG, PNG, or PDF";
pub const UPLOAD_FAILED: &str = "Failed to process request";

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory files are written to; created on first upload
    pub dir: PathBuf,
    /// URL prefix the directory is published under
    pub public_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public/uploads"),
            public_prefix: "/uploads".to_string(),
        }
    }
}

impl UploadConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }
}

/// Reply body for a stored file; also the attachment reference a
/// conversation turn carries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    pub pathname: String,
    pub content_type: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    NoFile,

    /// One message per failed rule
    #[error("{}", .0.join(", "))]
    Invalid(Vec<String>),

    #[error("multipart error: {0}")]
    Multipart(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check size and content type; every violated rule is reported
pub fn validate_upload(size: usize, content_type: &str) -> Result<(), UploadError> {
    let mut problems = Vec::new();
    if size > MAX_UPLOAD_BYTES {
        problems.push(FILE_TOO_LARGE.to_string());
    }
    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        problems.push(FILE_TYPE_NOT_ALLOWED.to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(UploadError::Invalid(problems))
    }
}

/// `<stem>_<millis><.ext>`, keeping only the final path component of the
/// client-supplied name.
pub fn unique_filename(original: &str, timestamp_millis: i64) -> String {
    let file_name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let path = Path::new(file_name);

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("upload");

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, timestamp_millis, ext),
        None => format!("{}_{}", stem, timestamp_millis),
    }
}

/// Validate and write one file, returning its public reference
pub async fn store_upload(
    config: &UploadConfig,
    original_name: &str,
    content_type: &str,
    data: &[u8],
) -> Result<UploadedFile, UploadError> {
    validate_upload(data.len(), content_type)?;

    tokio::fs::create_dir_all(&config.dir).await?;

    let filename = unique_filename(original_name, chrono::Utc::now().timestamp_millis());
    tokio::fs::write(config.dir.join(&filename), data).await?;

    tracing::info!(%filename, bytes = data.len(), %content_type, "stored upload");

    Ok(UploadedFile {
        url: format!("{}/{}", config.public_prefix.trim_end_matches('/'), filename),
        pathname: filename,
        content_type: content_type.to_string(),
    })
}
