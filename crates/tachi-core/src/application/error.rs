//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ValidationIssue;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The config file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// The config file exists but could not be read.
    #[error("Failed to read configuration {path}: {reason}")]
    ConfigReadFailed { path: PathBuf, reason: String },

    /// Generation was asked for on a config that does not validate.
    #[error("Configuration validation failed with {} issue(s)", issues.len())]
    InvalidConfiguration { issues: Vec<ValidationIssue> },

    /// Template rendering failed.
    #[error("Failed to render {artifact}: {reason}")]
    RenderingFailed { artifact: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared adapter state was poisoned by a panicking writer.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigNotFound { path } => vec![
                format!("No file at: {}", path.display()),
                "Pass the path with --config <FILE>".into(),
                "Or create one: tachi init".into(),
            ],
            Self::ConfigReadFailed { path, .. } => vec![
                format!("Could not read: {}", path.display()),
                "Check that the file is readable and UTF-8 encoded".into(),
            ],
            Self::InvalidConfiguration { issues } => {
                let mut suggestions: Vec<String> =
                    issues.iter().map(|i| format!("  • {}", i)).collect();
                suggestions.push("Fix the issues above, then run: tachi validate -c <FILE>".into());
                suggestions
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigReadFailed { .. } => ErrorCategory::Internal,
            Self::InvalidConfiguration { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
