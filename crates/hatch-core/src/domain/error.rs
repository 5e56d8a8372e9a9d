// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use super::report::RunPhase;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid metadata field '{field}': {reason}")]
    InvalidMetadata { field: &'static str, reason: String },

    #[error("Invalid artifact path '{path}': {reason}")]
    InvalidArtifactPath { path: String, reason: String },

    #[error("Duplicate artifact path: {path}")]
    DuplicatePath { path: String },

    #[error("Artifact manifest is empty")]
    EmptyManifest,

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Illegal run transition: {from} -> {to}")]
    InvalidTransition { from: RunPhase, to: RunPhase },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidMetadata { field, reason } => vec![
                format!("Fix the '{}' value in the [metadata] config section", field),
                format!("Details: {}", reason),
                "Versions look like 1.0.0 or 2.1.0-beta.1".into(),
            ],
            Self::InvalidArtifactPath { .. } => vec![
                "Artifact paths are relative to the output directory, e.g. 'preload.js'".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("Two artifacts would both write '{}'", path),
                "Each artifact needs its own relative path".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidMetadata { .. }
            | Self::InvalidArtifactPath { .. }
            | Self::DuplicatePath { .. }
            | Self::EmptyManifest => ErrorCategory::Validation,
            Self::InvalidTransition { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
