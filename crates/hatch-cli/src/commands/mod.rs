//! Command handlers, one module per subcommand.

use hatch_adapters::{LocalWriter, MetadataRenderer, electron_desktop_manifest};
use hatch_core::{
    application::EmitService, domain::ArtifactManifest, domain::MetadataSource, error::HatchError,
};

use crate::{config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod emit;
pub mod init;
pub mod list;

/// The emitter wired to the real filesystem, plus the built-in catalogue.
///
/// An invalid `[metadata]` section is a configuration problem, reported
/// before any artifact is touched.
fn desktop_emitter(config: &AppConfig) -> CliResult<(EmitService, ArtifactManifest)> {
    let metadata = config
        .to_metadata()
        .map_err(|e| HatchError::Configuration {
            message: format!("invalid [metadata] section: {e}"),
        })?;
    let manifest = electron_desktop_manifest().map_err(HatchError::from)?;

    let service = EmitService::new(
        Box::new(MetadataRenderer::new()),
        Box::new(LocalWriter::new()),
        MetadataSource::new(metadata),
    );
    Ok((service, manifest))
}
