//! Infrastructure adapters for Hatch.
//!
//! This crate implements the ports defined in `hatch-core::application::ports`.
//! It contains all filesystem access and the built-in artifact catalogue.

pub mod builtin_artifacts;
pub mod renderer;
pub mod writer;

// Re-export commonly used adapters
pub use builtin_artifacts::electron_desktop_manifest;
pub use renderer::MetadataRenderer;
pub use writer::{LocalWriter, MemoryWriter};
