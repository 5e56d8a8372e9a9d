//! Application metadata shared by every artifact.
//!
//! One [`AppMetadata`] record is built per run and handed out through a
//! [`MetadataSource`]. Every template that mentions the product name or
//! version reads it from here, so the bridge script and the README can never
//! disagree.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::{DomainError, RenderContext};

pub const DEFAULT_NAME: &str = "HealthTracker 2025";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_DESCRIPTION: &str =
    "Профессиональное приложение для отслеживания показателей тела";
pub const DEFAULT_AUTHOR: &str = "HealthTracker Team";

/// Immutable metadata record.
///
/// Fields are private; the only way in is [`AppMetadata::builder`], which
/// validates everything once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppMetadata {
    name: String,
    version: String,
    description: String,
    author: String,
    is_electron_host: bool,
    build_timestamp: DateTime<Utc>,
}

impl AppMetadata {
    pub fn builder() -> AppMetadataBuilder {
        AppMetadataBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn is_electron_host(&self) -> bool {
        self.is_electron_host
    }

    /// ISO-8601 timestamp in the same shape JavaScript's `toISOString` produces.
    pub fn build_timestamp_iso(&self) -> String {
        self.build_timestamp
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Display for AppMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// Builder for [`AppMetadata`]. Unset fields fall back to the built-in
/// product defaults.
#[derive(Debug, Default, Clone)]
pub struct AppMetadataBuilder {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    author: Option<String>,
    is_electron_host: Option<bool>,
    build_timestamp: Option<DateTime<Utc>>,
}

impl AppMetadataBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn electron_host(mut self, is_electron_host: bool) -> Self {
        self.is_electron_host = Some(is_electron_host);
        self
    }

    /// Pin the build timestamp. Defaults to the moment `build` is called.
    pub fn build_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.build_timestamp = Some(at);
        self
    }

    pub fn build(self) -> Result<AppMetadata, DomainError> {
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.into());
        let version = self.version.unwrap_or_else(|| DEFAULT_VERSION.into());
        let description = self.description.unwrap_or_else(|| DEFAULT_DESCRIPTION.into());
        let author = self.author.unwrap_or_else(|| DEFAULT_AUTHOR.into());

        require_non_blank("name", &name)?;
        require_non_blank("version", &version)?;
        require_non_blank("author", &author)?;
        reject_unsafe_chars("description", &description)?;

        if !is_semver(&version) {
            return Err(DomainError::InvalidMetadata {
                field: "version",
                reason: format!("'{}' is not a semantic version (MAJOR.MINOR.PATCH)", version),
            });
        }

        Ok(AppMetadata {
            name: name.trim().to_string(),
            version,
            description,
            author: author.trim().to_string(),
            is_electron_host: self.is_electron_host.unwrap_or(true),
            build_timestamp: self.build_timestamp.unwrap_or_else(Utc::now),
        })
    }
}

fn require_non_blank(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidMetadata {
            field,
            reason: "must not be empty".into(),
        });
    }
    reject_unsafe_chars(field, value)
}

/// Characters that change meaning somewhere a value is pasted verbatim:
/// single-quoted JS strings, JSON strings in the README, and batch `echo`
/// lines (`& | < > ^ %` are cmd.exe metacharacters).
const UNSAFE_CHARS: [char; 11] = ['\n', '\r', '\'', '"', '\\', '&', '|', '<', '>', '^', '%'];

fn reject_unsafe_chars(field: &'static str, value: &str) -> Result<(), DomainError> {
    if let Some(bad) = value.chars().find(|c| UNSAFE_CHARS.contains(c)) {
        return Err(DomainError::InvalidMetadata {
            field,
            reason: format!(
                "must not contain {:?}; quotes, backslashes, line breaks and & | < > ^ % are not allowed",
                bad
            ),
        });
    }
    Ok(())
}

/// `MAJOR.MINOR.PATCH[-prerelease][+build]`, numeric core without leading zeros.
fn is_semver(version: &str) -> bool {
    let (core, build) = match version.split_once('+') {
        Some((core, build)) => (core, Some(build)),
        None => (version, None),
    };
    let (core, pre) = match core.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (core, None),
    };

    let numeric_ok = |part: &str| {
        !part.is_empty()
            && part.chars().all(|c| c.is_ascii_digit())
            && (part == "0" || !part.starts_with('0'))
    };
    let ident_ok = |s: &str| {
        s.split('.')
            .all(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
    };

    let parts: Vec<&str> = core.split('.').collect();
    parts.len() == 3
        && parts.iter().all(|p| numeric_ok(p))
        && pre.is_none_or(ident_ok)
        && build.is_none_or(ident_ok)
}

/// Read-only accessor for the run's metadata record.
///
/// Cloning a source shares the same record instance.
#[derive(Debug, Clone)]
pub struct MetadataSource {
    record: Arc<AppMetadata>,
}

impl MetadataSource {
    pub fn new(record: AppMetadata) -> Self {
        Self {
            record: Arc::new(record),
        }
    }

    /// Built-in product metadata, stamped with the current time.
    pub fn builtin() -> Self {
        // Defaults are validated by the unit tests below.
        let record = AppMetadata {
            name: DEFAULT_NAME.into(),
            version: DEFAULT_VERSION.into(),
            description: DEFAULT_DESCRIPTION.into(),
            author: DEFAULT_AUTHOR.into(),
            is_electron_host: true,
            build_timestamp: Utc::now(),
        };
        Self::new(record)
    }

    pub fn get(&self) -> &AppMetadata {
        &self.record
    }

    /// Variables exposed to parameterized templates.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::from_metadata(&self.record)
    }
}
