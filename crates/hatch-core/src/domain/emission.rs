//! Per-artifact outcome.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Why a single artifact was not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionErrorKind {
    /// Target (or its directory) is not writable.
    PermissionDenied,
    /// Parent directory does not exist.
    PathNotFound,
    /// Rendered text cannot be represented in the requested encoding.
    EncodingError,
    /// File exists and the run was told to keep existing files.
    AlreadyExists,
    /// Any other I/O failure.
    Io,
}

impl EmissionErrorKind {
    /// Classify an I/O failure.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
                Self::PermissionDenied
            }
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => Self::PathNotFound,
            io::ErrorKind::AlreadyExists => Self::AlreadyExists,
            io::ErrorKind::InvalidData => Self::EncodingError,
            _ => Self::Io,
        }
    }
}

impl fmt::Display for EmissionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PermissionDenied => "permission denied",
            Self::PathNotFound => "path not found",
            Self::EncodingError => "encoding error",
            Self::AlreadyExists => "already exists",
            Self::Io => "i/o error",
        };
        f.write_str(s)
    }
}

/// Outcome of one artifact attempt.
///
/// Failures carry both a kind and the human message; successes carry the
/// number of bytes put on disk (zero for a dry run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmissionResult {
    path: PathBuf,
    succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<EmissionErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    bytes_written: usize,
    dry_run: bool,
}

impl EmissionResult {
    pub fn success(path: impl Into<PathBuf>, bytes_written: usize) -> Self {
        Self {
            path: path.into(),
            succeeded: true,
            error_kind: None,
            error_message: None,
            bytes_written,
            dry_run: false,
        }
    }

    /// A write that was planned but deliberately not performed.
    pub fn planned(path: impl Into<PathBuf>) -> Self {
        Self {
            dry_run: true,
            ..Self::success(path, 0)
        }
    }

    pub fn failure(
        path: impl Into<PathBuf>,
        kind: EmissionErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            succeeded: false,
            error_kind: Some(kind),
            error_message: Some(message.into()),
            bytes_written: 0,
            dry_run: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn error_kind(&self) -> Option<EmissionErrorKind> {
        self.error_kind
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}
