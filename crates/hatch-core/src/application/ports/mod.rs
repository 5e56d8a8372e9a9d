//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hatch-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateRenderer`: turns an artifact spec into text
//!   - `ArtifactWriter`: persists text to a path
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by `EmitService`)

pub mod output;

pub use output::{ArtifactWriter, TemplateRenderer};

#[cfg(test)]
pub use output::{MockArtifactWriter, MockTemplateRenderer};
