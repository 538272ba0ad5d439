// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Validation problems are *not* errors: they are accumulated as
/// [`ValidationIssue`](crate::domain::ValidationIssue) values. Only input that
/// cannot be turned into a model at all, or a plan that breaks its own
/// invariants, ends up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Input Errors
    // ========================================================================
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    // ========================================================================
    // Plan Invariants
    // ========================================================================
    #[error("Duplicate path in generation plan: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path would leave the output directory: {path}")]
    PathEscapesOutput { path: String },

    #[error("Generation plan is empty")]
    EmptyPlan,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedInput { reason } => vec![
                "The configuration file could not be read as a YAML mapping".into(),
                format!("Details: {}", reason),
                "Top-level keys are: name, strategy, azure, services".into(),
                "Try: tachi init to write a starter configuration".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("Two artifacts would be written to '{}'", path),
                "Check that service names are unique".into(),
            ],
            Self::PathEscapesOutput { path } => vec![
                format!("'{}' climbs out of the output directory", path),
                "Service names become file names; remove '..' and leading '/' from them".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedInput { .. } | Self::PathEscapesOutput { .. } => {
                ErrorCategory::Validation
            }
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } | Self::EmptyPlan => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
