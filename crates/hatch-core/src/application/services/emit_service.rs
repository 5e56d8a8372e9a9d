//! Emit Service - main application orchestrator.
//!
//! This service coordinates one emitter run:
//! 1. Validate the manifest
//! 2. Render every artifact against the shared metadata
//! 3. Write every artifact (or preview the write on a dry run)
//! 4. Close the report
//!
//! Each artifact is attempted exactly once. A failed write never stops the
//! remaining artifacts from being attempted.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ArtifactWriter, TemplateRenderer},
    },
    domain::{
        ArtifactManifest, ArtifactSpec, EmissionErrorKind, EmissionReport, EmissionResult,
        Encoding, MetadataSource, OverwritePolicy, RunPhase,
    },
    error::HatchResult,
};

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    pub overwrite: OverwritePolicy,
    /// Render and check targets, but write nothing.
    pub dry_run: bool,
}

/// Rendered view of one artifact for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PlannedArtifact {
    pub path: String,
    pub encoding: Encoding,
    pub bytes: usize,
    pub parameterized: bool,
    pub description: &'static str,
}

/// Main emission service.
pub struct EmitService {
    renderer: Box<dyn TemplateRenderer>,
    writer: Box<dyn ArtifactWriter>,
    metadata: MetadataSource,
}

impl EmitService {
    /// Create a new emit service with the given adapters and the run's
    /// metadata record.
    pub fn new(
        renderer: Box<dyn TemplateRenderer>,
        writer: Box<dyn ArtifactWriter>,
        metadata: MetadataSource,
    ) -> Self {
        Self {
            renderer,
            writer,
            metadata,
        }
    }

    pub fn metadata(&self) -> &MetadataSource {
        &self.metadata
    }

    /// Run the emitter against `output_root`.
    ///
    /// Returns `Err` only for problems that prevent the run from starting
    /// (an invalid manifest). Write failures are in the report.
    #[instrument(
        skip_all,
        fields(
            artifacts = manifest.len(),
            output = %output_root.as_ref().display(),
            dry_run = options.dry_run
        )
    )]
    pub fn emit(
        &self,
        manifest: &ArtifactManifest,
        output_root: impl AsRef<Path>,
        options: EmitOptions,
    ) -> HatchResult<EmissionReport> {
        let output_root = output_root.as_ref();
        manifest.validate()?;

        info!(metadata = %self.metadata.get(), "Emitting artifacts");

        let mut report = EmissionReport::new();

        // 1. Render
        report.advance(RunPhase::Rendering)?;
        let rendered: Vec<(&ArtifactSpec, String)> = manifest
            .iter()
            .map(|spec| (spec, self.renderer.render(spec, self.metadata.get())))
            .collect();

        // 2. Write
        report.advance(RunPhase::Writing)?;
        for (spec, content) in &rendered {
            let path = spec.relative_path().resolve(output_root);

            let result = if options.dry_run {
                self.preview(&path, content, spec.encoding(), options.overwrite)
            } else {
                self.writer
                    .write(&path, content, spec.encoding(), options.overwrite)
            };

            if result.succeeded() {
                debug!(path = %path.display(), bytes = result.bytes_written(), "artifact done");
            } else {
                warn!(
                    path = %path.display(),
                    kind = ?result.error_kind(),
                    error = result.error_message().unwrap_or_default(),
                    "artifact not written"
                );
            }
            report.record(result);
        }

        // 3. Report
        report.advance(RunPhase::Reported)?;
        info!(
            succeeded = report.succeeded_count(),
            failed = report.failed_count(),
            "Emission finished"
        );

        report.advance(RunPhase::Done)?;
        Ok(report)
    }

    /// Render the manifest without touching any target.
    pub fn plan(&self, manifest: &ArtifactManifest) -> HatchResult<Vec<PlannedArtifact>> {
        manifest.validate()?;

        Ok(manifest
            .iter()
            .map(|spec| {
                let content = self.renderer.render(spec, self.metadata.get());
                PlannedArtifact {
                    path: spec.relative_path().to_string(),
                    encoding: spec.encoding(),
                    bytes: content.len(),
                    parameterized: spec.content().is_parameterized(),
                    description: spec.description(),
                }
            })
            .collect())
    }

    /// Fail when any artifact in `report` was not written.
    pub fn ensure_complete(report: &EmissionReport) -> HatchResult<()> {
        if report.all_succeeded() {
            return Ok(());
        }
        Err(ApplicationError::IncompleteEmission {
            failed: report.failed_count(),
            total: report.total(),
        }
        .into())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Predict the outcome of a write without performing it.
    fn preview(
        &self,
        path: &Path,
        content: &str,
        encoding: Encoding,
        policy: OverwritePolicy,
    ) -> EmissionResult {
        if let Err(e) = encoding.encode(content) {
            return EmissionResult::failure(path, EmissionErrorKind::EncodingError, e.to_string());
        }

        let parent_missing = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .is_some_and(|p| !self.writer.exists(p));
        if parent_missing {
            return EmissionResult::failure(
                path,
                EmissionErrorKind::PathNotFound,
                "parent directory does not exist",
            );
        }

        if policy == OverwritePolicy::KeepExisting && self.writer.exists(path) {
            return EmissionResult::failure(
                path,
                EmissionErrorKind::AlreadyExists,
                "file exists and would be kept",
            );
        }

        EmissionResult::planned(path)
    }
}
