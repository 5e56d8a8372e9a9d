use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// Location of an artifact below the output directory.
///
/// Always non-empty, UTF-8, and confined to the output directory: no root,
/// no drive prefix, no `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(String);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let invalid = |reason: &str| DomainError::InvalidArtifactPath {
            path: path.display().to_string(),
            reason: reason.to_owned(),
        };

        if path.as_os_str().is_empty() {
            return Err(invalid("path is empty"));
        }
        for component in path.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(invalid("'..' would leave the output directory")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("must be relative to the output directory"));
                }
            }
        }
        let text = path.to_str().ok_or_else(|| invalid("not valid UTF-8"))?;
        Ok(Self(text.to_owned()))
    }

    /// Target file for this artifact inside `root`.
    pub fn resolve(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
