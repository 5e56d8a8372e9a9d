//! Core of the Hatch artifact emitter.
//!
//! - [`domain`]: the metadata record, artifact definitions, per-artifact
//!   results and the run report. No I/O.
//! - [`application`]: [`EmitService`](application::EmitService), which renders
//!   every artifact from one [`MetadataSource`](domain::MetadataSource) and
//!   hands the text to an [`ArtifactWriter`](application::ArtifactWriter).
//!   Rendering and writing are ports so adapters decide the template engine
//!   and the storage.
//!
//! ```rust,ignore
//! use hatch_core::prelude::*;
//!
//! let service = EmitService::new(renderer, writer, MetadataSource::builtin());
//! let report = service.emit(&manifest, "./desktop", EmitOptions::default())?;
//! print!("{}", report.summarize());
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Everything an adapter or front end usually needs.
pub mod prelude {
    pub use crate::application::{
        EmitOptions, EmitService, PlannedArtifact,
        ports::{ArtifactWriter, TemplateRenderer},
    };
    pub use crate::domain::{
        AppMetadata, ArtifactManifest, ArtifactSpec, EmissionErrorKind, EmissionReport,
        EmissionResult, Encoding, MetadataSource, OverwritePolicy, RelativePath, RenderContext,
        RunPhase, TemplateContent, TemplateSource,
    };
    pub use crate::error::{HatchError, HatchResult};
}
