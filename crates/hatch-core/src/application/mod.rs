//! The emission use case and the ports it drives.
//!
//! [`EmitService`] sequences a run (render everything, write everything,
//! report); rules about metadata, paths and results stay in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{EmitOptions, EmitService, PlannedArtifact};

pub use ports::{ArtifactWriter, TemplateRenderer};

pub use error::ApplicationError;
