//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hatch-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{AppMetadata, ArtifactSpec, EmissionResult, Encoding, OverwritePolicy};

/// Port for template rendering.
///
/// Implemented by:
/// - `hatch_adapters::MetadataRenderer` (literal passthrough + `{{VAR}}` substitution)
///
/// Rendering has no failure mode: it is a pure function over in-memory
/// strings. Implementations only read the artifact definition.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, spec: &ArtifactSpec, meta: &AppMetadata) -> String;
}

/// Port for persisting one artifact.
///
/// Implemented by:
/// - `hatch_adapters::LocalWriter` (production)
/// - `hatch_adapters::MemoryWriter` (testing)
///
/// ## Contract
///
/// - Parent directories are never created; a missing parent is reported as
///   `PathNotFound`.
/// - Every failure is returned inside the [`EmissionResult`]. Implementations
///   must not panic and have no error channel.
/// - The file handle is released before `write` returns, on every path.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactWriter: Send + Sync {
    fn write(
        &self,
        path: &Path,
        content: &str,
        encoding: Encoding,
        policy: OverwritePolicy,
    ) -> EmissionResult;

    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}
