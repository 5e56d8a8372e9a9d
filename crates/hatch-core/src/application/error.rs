//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Per-artifact write failures are never raised here; they live in the
//! report.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Strict mode was requested and at least one artifact was not written.
    #[error("{failed} of {total} artifacts were not written")]
    IncompleteEmission { failed: usize, total: usize },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::IncompleteEmission { .. } => vec![
                "See the per-artifact lines above for the cause of each failure".into(),
                "Check that the output directory exists and is writable".into(),
                "Drop --strict to treat partial output as success".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IncompleteEmission { .. } => ErrorCategory::Internal,
        }
    }
}
