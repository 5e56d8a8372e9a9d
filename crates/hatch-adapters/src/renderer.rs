//! Metadata substitution renderer.

use hatch_core::{
    application::ports::TemplateRenderer,
    domain::{AppMetadata, ArtifactSpec, RenderContext, TemplateContent},
};
use tracing::{instrument, trace};

/// Renderer that fills `{{VAR}}` placeholders from the run's metadata.
///
/// Literal content is returned byte-for-byte.
#[derive(Debug, Clone, Copy)]
pub struct MetadataRenderer;

impl MetadataRenderer {
    /// Create a new metadata renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for MetadataRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MetadataRenderer {
    #[instrument(skip_all, fields(artifact = %spec.relative_path()))]
    fn render(&self, spec: &ArtifactSpec, meta: &AppMetadata) -> String {
        let out = match spec.content() {
            TemplateContent::Literal(source) => source.as_str().to_string(),
            TemplateContent::Parameterized(source) => {
                RenderContext::from_metadata(meta).render(source.as_str())
            }
        };
        trace!(bytes = out.len(), "rendered");
        out
    }
}
