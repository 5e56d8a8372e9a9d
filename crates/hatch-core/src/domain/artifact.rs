//! Artifact definitions.
//!
//! An [`ArtifactSpec`] says *what* gets written: a relative path, a template
//! and an encoding. An [`ArtifactManifest`] is the ordered set of specs for
//! one run; its order is the order artifacts are attempted and reported in.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, RelativePath};

// ============================================================================
// Encoding
// ============================================================================

/// Character encoding used when persisting an artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    Ascii,
}

/// A character the target encoding cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unrepresentable {
    pub ch: char,
    /// Byte offset into the rendered text.
    pub offset: usize,
}

impl fmt::Display for Unrepresentable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "character {:?} (U+{:04X}) at byte {} cannot be encoded",
            self.ch, self.ch as u32, self.offset
        )
    }
}

impl Encoding {
    /// Encode rendered text into the bytes that go on disk.
    pub fn encode<'a>(&self, content: &'a str) -> Result<Cow<'a, [u8]>, Unrepresentable> {
        match self {
            Self::Utf8 => Ok(Cow::Borrowed(content.as_bytes())),
            Self::Ascii => match content.char_indices().find(|(_, c)| !c.is_ascii()) {
                Some((offset, ch)) => Err(Unrepresentable { ch, offset }),
                None => Ok(Cow::Borrowed(content.as_bytes())),
            },
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Ascii => write!(f, "ASCII"),
        }
    }
}

// ============================================================================
// Overwrite policy
// ============================================================================

/// What to do when the target file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace prior content unconditionally.
    #[default]
    Overwrite,
    /// Leave the existing file alone and report the artifact as not written.
    KeepExisting,
}

impl OverwritePolicy {
    pub fn from_flag(overwrite_existing: bool) -> Self {
        if overwrite_existing {
            Self::Overwrite
        } else {
            Self::KeepExisting
        }
    }
}

// ============================================================================
// Template content
// ============================================================================

/// Template text embedded at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
        }
    }
}

/// How a template body is turned into artifact text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    /// Used exactly as provided.
    Literal(TemplateSource),

    /// Contains `{{VARIABLE}}` placeholders filled from metadata.
    Parameterized(TemplateSource),
}

impl TemplateContent {
    pub fn literal(source: impl Into<TemplateSource>) -> Self {
        Self::Literal(source.into())
    }

    pub fn parameterized(source: impl Into<TemplateSource>) -> Self {
        Self::Parameterized(source.into())
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Parameterized(s) => s.as_str(),
        }
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self, Self::Parameterized(_))
    }
}

// ============================================================================
// ArtifactSpec
// ============================================================================

/// Definition of one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    relative_path: RelativePath,
    content: TemplateContent,
    encoding: Encoding,
    description: &'static str,
}

impl ArtifactSpec {
    pub fn new(
        relative_path: impl Into<std::path::PathBuf>,
        content: TemplateContent,
        encoding: Encoding,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            relative_path: RelativePath::try_new(relative_path)?,
            content,
            encoding,
            description: "",
        })
    }

    /// Attach a one-line purpose shown by `hatch list`.
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    pub fn content(&self) -> &TemplateContent {
        &self.content
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

// ============================================================================
// ArtifactManifest
// ============================================================================

/// Ordered, duplicate-free set of artifacts for one run.
#[derive(Debug, Clone, Default)]
pub struct ArtifactManifest {
    specs: Vec<ArtifactSpec>,
}

impl ArtifactManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a spec, rejecting a path that is already defined.
    pub fn push(&mut self, spec: ArtifactSpec) -> Result<(), DomainError> {
        if self
            .specs
            .iter()
            .any(|s| s.relative_path == spec.relative_path)
        {
            return Err(DomainError::DuplicatePath {
                path: spec.relative_path.to_string(),
            });
        }
        self.specs.push(spec);
        Ok(())
    }

    pub fn with(mut self, spec: ArtifactSpec) -> Result<Self, DomainError> {
        self.push(spec)?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.specs.is_empty() {
            return Err(DomainError::EmptyManifest);
        }

        let mut seen = HashSet::new();
        for spec in &self.specs {
            if !seen.insert(spec.relative_path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: spec.relative_path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtifactSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<'a> IntoIterator for &'a ArtifactManifest {
    type Item = &'a ArtifactSpec;
    type IntoIter = std::slice::Iter<'a, ArtifactSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}
