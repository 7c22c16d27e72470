//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Notice Types** - Transient user-facing notifications
//! - **API Types** - Media service response structures
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Notice Types
// =============================================================================

/// Severity of a transient notice shown in the notice stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational message
    Info,
    /// Success/completion message
    Success,
    /// Error message
    Error,
}

impl NoticeLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice-info",
            NoticeLevel::Success => "notice-success",
            NoticeLevel::Error => "notice-error",
        }
    }

    /// Get emoji prefix for display.
    pub fn emoji(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "ℹ️",
            NoticeLevel::Success => "✅",
            NoticeLevel::Error => "❌",
        }
    }
}

/// A single transient notice.
///
/// Pushed when an upload finishes or fails; expires after a fixed TTL.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    /// Identity used for keyed rendering and timed removal.
    pub id: u64,
    /// Severity level
    pub level: NoticeLevel,
    /// Notice message
    pub message: String,
}

// =============================================================================
// API Response Types
// =============================================================================

/// Response from the media service upload endpoint.
///
/// Only the fields the uploader relies on; the service returns many more.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaUploadResponse {
    /// Canonical HTTPS location of the stored asset.
    pub secure_url: String,
    /// Service-side asset identifier.
    pub public_id: Option<String>,
    /// Stored size in bytes, as reported by the service.
    pub bytes: Option<u64>,
    /// Detected resource kind ("image", "raw", ...).
    pub resource_type: Option<String>,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error taxonomy for the uploader. Every failure is local to one
/// upload lane; none of these abort the app.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// File rejected before transport (too large, wrong extension).
    Validation(String),
    /// Operation requested against a lane in the wrong state.
    Precondition(String),
    /// Transport failed: non-success status, network error, or timeout.
    Transport(String),
    /// Success status but the response body lacked the expected location.
    ResponseShape(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Precondition(msg) => write!(f, "Precondition error: {}", msg),
            AppError::Transport(msg) => write!(f, "Upload error: {}", msg),
            AppError::ResponseShape(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
