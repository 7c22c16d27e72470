//! Application configuration.
//!
//! Centralized configuration for the supplier portal frontend. The constants
//! below are the defaults; they are gathered into an [`UploadConfig`] value
//! that is handed to the slot manager and the upload service at construction
//! time, so nothing in the app reads module-level state after startup.

use crate::types::{AppError, AppResult};

/// Media service account (cloud name) uploads are sent to.
pub const MEDIA_CLOUD_NAME: &str = "nexbridge-it";

/// Unsigned upload preset configured on the media service.
pub const UPLOAD_PRESET: &str = "supplier_documents";

/// Tags attached to every uploaded asset.
pub const UPLOAD_TAGS: &str = "supplier-portal,onboarding";

/// Maximum size of a single document (in bytes).
///
/// 10 MiB limit.
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// File extensions accepted by the uploader (matched case-insensitively).
pub const ALLOWED_EXTENSIONS: &[&str] =
    &["pdf", "doc", "docx", "jpg", "jpeg", "png", "txt", "rtf"];

/// Upload transport timeout (in milliseconds).
///
/// The only bound on an in-flight upload; there is no user-facing abort.
pub const UPLOAD_TIMEOUT_MS: u32 = 60_000;

/// Settling delay before the replenishment scan runs (in milliseconds).
///
/// Lets a batch of near-simultaneous completions land before the lane
/// collection is re-scanned for a new empty lane.
pub const REPLENISH_SETTLE_MS: u32 = 350;

/// How long a transient notice stays on screen (in milliseconds).
pub const NOTICE_TTL_MS: u32 = 5_000;

/// Runtime configuration for the uploader.
///
/// Built from the module constants by [`UploadConfig::default`]; tests and
/// alternate deployments construct their own values instead of mutating
/// globals.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadConfig {
    /// Media service cloud name (account identifier).
    pub cloud_name: String,
    /// Unsigned upload preset identifier.
    pub upload_preset: String,
    /// Comma-separated tags attached to each asset.
    pub tags: String,
    /// Per-document size ceiling in bytes.
    pub max_document_bytes: u64,
    /// Accepted file extensions, lower-case.
    pub allowed_extensions: Vec<String>,
    /// Transport timeout in milliseconds.
    pub timeout_ms: u32,
    /// Replenishment settling delay in milliseconds.
    pub replenish_settle_ms: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            cloud_name: MEDIA_CLOUD_NAME.to_string(),
            upload_preset: UPLOAD_PRESET.to_string(),
            tags: UPLOAD_TAGS.to_string(),
            max_document_bytes: MAX_DOCUMENT_BYTES,
            allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            timeout_ms: UPLOAD_TIMEOUT_MS,
            replenish_settle_ms: REPLENISH_SETTLE_MS,
        }
    }
}

impl UploadConfig {
    /// Endpoint URL for multipart uploads on the media service.
    pub fn upload_url(&self) -> String {
        format!("https://api.cloudinary.com/v1_1/{}/auto/upload", self.cloud_name)
    }

    /// Validate a candidate file against the size ceiling and extension set.
    ///
    /// Runs before any transport call; a rejected file never leaves the
    /// browser.
    pub fn validate_file(&self, name: &str, size: u64) -> AppResult<()> {
        if size > self.max_document_bytes {
            return Err(AppError::Validation(format!(
                "{} is too large ({:.1} MB); the limit is {} MB",
                name,
                size as f64 / (1024.0 * 1024.0),
                self.max_document_bytes / (1024 * 1024),
            )));
        }

        match file_extension(name) {
            Some(ext) if self.allowed_extensions.iter().any(|a| a == &ext) => Ok(()),
            _ => Err(AppError::Validation(format!(
                "{} has an unsupported file type; accepted: {}",
                name,
                self.allowed_extensions.join(", "),
            ))),
        }
    }
}

/// Lower-cased extension of a file name, if it has one.
pub fn file_extension(name: &str) -> Option<String> {
    let ext = name.rsplit_once('.')?.1;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(file_extension("scan.JPG"), Some("jpg".to_string()));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_validate_accepts_allowed_types() {
        let config = UploadConfig::default();
        assert!(config.validate_file("contract.pdf", 2 * 1024 * 1024).is_ok());
        assert!(config.validate_file("photo.JPG", 512).is_ok());
    }

    #[test]
    fn test_validate_rejects_oversize() {
        let config = UploadConfig::default();
        let err = config
            .validate_file("huge.pdf", MAX_DOCUMENT_BYTES + 1)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_unknown_extension() {
        let config = UploadConfig::default();
        let err = config.validate_file("tool.exe", 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_upload_url_uses_cloud_name() {
        let config = UploadConfig::default();
        assert_eq!(
            config.upload_url(),
            format!("https://api.cloudinary.com/v1_1/{}/auto/upload", MEDIA_CLOUD_NAME)
        );
    }
}
