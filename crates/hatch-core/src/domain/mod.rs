//! Core domain layer for Hatch.
//!
//! Pure data and rules: what an artifact is, what metadata every artifact
//! shares, what a run produces. No filesystem access happens here; writing
//! is done by adapters behind the ports in `crate::application`.
//!
//! - **No I/O**: encoding and rendering are in-memory transforms
//! - **Immutable records**: metadata and specs never change after construction
//! - **Ordered output**: manifests and reports preserve definition order

pub mod artifact;
pub mod common;
pub mod emission;
pub mod error;
pub mod metadata;
pub mod render_context;
pub mod report;

pub use artifact::{
    ArtifactManifest, ArtifactSpec, Encoding, OverwritePolicy, TemplateContent, TemplateSource,
    Unrepresentable,
};
pub use common::RelativePath;
pub use emission::{EmissionErrorKind, EmissionResult};
pub use error::{DomainError, ErrorCategory};
pub use metadata::{AppMetadata, AppMetadataBuilder, MetadataSource};
pub use render_context::RenderContext;
pub use report::{EmissionReport, RunPhase};
