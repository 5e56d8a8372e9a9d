//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only ever sees the
//! [`AppMetadata`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `HATCH_*` environment variables, `__` between levels
//!    (`HATCH_EMIT__STRICT=true`, `HATCH_METADATA__VERSION=2.0.0`)
//! 3. Config file: `--config FILE`, otherwise the user config file and then
//!    `./.hatch.toml`
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use hatch_core::domain::{
    AppMetadata, DomainError,
    metadata::{DEFAULT_AUTHOR, DEFAULT_DESCRIPTION, DEFAULT_NAME, DEFAULT_VERSION},
};

/// File name used by `hatch init --local` and picked up from the CWD.
pub const LOCAL_CONFIG_FILE: &str = ".hatch.toml";

const ENV_PREFIX: &str = "HATCH";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The shared record rendered into every artifact.
    pub metadata: MetadataConfig,
    /// Where and how to write.
    pub emit: EmitConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.into(),
            version: DEFAULT_VERSION.into(),
            description: DEFAULT_DESCRIPTION.into(),
            author: DEFAULT_AUTHOR.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub output_dir: PathBuf,
    pub overwrite_existing: bool,
    pub strict: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            overwrite_existing: true,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// A file passed via `--config` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder
                .add_source(File::from(Self::config_path()).required(false))
                .add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        let loaded = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize::<Self>()
            .context("Configuration has an invalid shape")?;

        debug!(?loaded, "Configuration loaded");
        Ok(loaded)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.hatch.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "hatch", "hatch")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Build the metadata record every artifact will share.
    pub fn to_metadata(&self) -> Result<AppMetadata, DomainError> {
        AppMetadata::builder()
            .name(self.metadata.name.as_str())
            .version(self.metadata.version.as_str())
            .description(self.metadata.description.as_str())
            .author(self.metadata.author.as_str())
            .build()
    }
}
