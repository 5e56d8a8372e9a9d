//! In-memory writer for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use hatch_core::{
    application::ports::ArtifactWriter,
    domain::{EmissionErrorKind, EmissionResult, Encoding, OverwritePolicy},
};

/// In-memory writer for testing.
///
/// Directories must be declared with [`MemoryWriter::with_dir`] before files
/// can be written under them, mirroring the "parents are never created" rule.
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    inner: Arc<RwLock<MemoryWriterInner>>,
}

#[derive(Debug, Default)]
struct MemoryWriterInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    read_only: HashSet<PathBuf>,
}

impl MemoryWriter {
    /// Create a new empty writer with no directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a directory (and its ancestors).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let mut current = PathBuf::new();
            for component in path.as_ref().components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
        self
    }

    /// Mark a file or directory as not writable.
    pub fn with_read_only(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.as_ref().to_path_buf());
        }
        self
    }

    /// Seed a file, as if it existed before the run.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner
                .files
                .insert(path.as_ref().to_path_buf(), content.as_bytes().to_vec());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        let bytes = inner.files.get(path.as_ref())?;
        String::from_utf8(bytes.clone()).ok()
    }

    /// All file paths, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl ArtifactWriter for MemoryWriter {
    fn write(
        &self,
        path: &Path,
        content: &str,
        encoding: Encoding,
        policy: OverwritePolicy,
    ) -> EmissionResult {
        let Ok(mut inner) = self.inner.write() else {
            return EmissionResult::failure(path, EmissionErrorKind::Io, "writer state poisoned");
        };

        let bytes = match encoding.encode(content) {
            Ok(bytes) => bytes.into_owned(),
            Err(e) => {
                return EmissionResult::failure(path, EmissionErrorKind::EncodingError, e.to_string());
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !inner.directories.contains(parent) {
                return EmissionResult::failure(
                    path,
                    EmissionErrorKind::PathNotFound,
                    "parent directory does not exist",
                );
            }
            if inner.read_only.contains(parent) {
                return EmissionResult::failure(
                    path,
                    EmissionErrorKind::PermissionDenied,
                    "directory is read-only",
                );
            }
        }

        if inner.read_only.contains(path) {
            return EmissionResult::failure(
                path,
                EmissionErrorKind::PermissionDenied,
                "file is read-only",
            );
        }

        if policy == OverwritePolicy::KeepExisting && inner.files.contains_key(path) {
            return EmissionResult::failure(
                path,
                EmissionErrorKind::AlreadyExists,
                "file exists and overwrite is disabled",
            );
        }

        let len = bytes.len();
        inner.files.insert(path.to_path_buf(), bytes);
        EmissionResult::success(path, len)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_into_declared_dir() {
        let writer = MemoryWriter::new().with_dir("/out");
        let result = writer.write(
            Path::new("/out/a.js"),
            "x",
            Encoding::Utf8,
            OverwritePolicy::Overwrite,
        );
        assert!(result.succeeded());
        assert_eq!(writer.read_file("/out/a.js").as_deref(), Some("x"));
    }

    #[test]
    fn undeclared_dir_is_path_not_found() {
        let writer = MemoryWriter::new();
        let result = writer.write(
            Path::new("/out/a.js"),
            "x",
            Encoding::Utf8,
            OverwritePolicy::Overwrite,
        );
        assert_eq!(result.error_kind(), Some(EmissionErrorKind::PathNotFound));
        assert!(writer.list_files().is_empty());
    }

    #[test]
    fn read_only_file_is_denied() {
        let writer = MemoryWriter::new()
            .with_dir("/out")
            .with_read_only("/out/a.js");
        let result = writer.write(
            Path::new("/out/a.js"),
            "x",
            Encoding::Utf8,
            OverwritePolicy::Overwrite,
        );
        assert_eq!(result.error_kind(), Some(EmissionErrorKind::PermissionDenied));
    }

    #[test]
    fn seeded_file_respects_overwrite_policy() {
        let writer = MemoryWriter::new()
            .with_dir("/out")
            .with_file("/out/a.js", "old");
        let path = Path::new("/out/a.js");

        let kept = writer.write(path, "new", Encoding::Utf8, OverwritePolicy::KeepExisting);
        assert_eq!(kept.error_kind(), Some(EmissionErrorKind::AlreadyExists));
        assert_eq!(writer.read_file(path).as_deref(), Some("old"));

        let replaced = writer.write(path, "new", Encoding::Utf8, OverwritePolicy::Overwrite);
        assert!(replaced.succeeded());
        assert_eq!(writer.read_file(path).as_deref(), Some("new"));
    }

    #[test]
    fn clones_share_state() {
        let writer = MemoryWriter::new().with_dir("/out");
        let clone = writer.clone();
        clone.write(
            Path::new("/out/b.md"),
            "y",
            Encoding::Utf8,
            OverwritePolicy::Overwrite,
        );
        assert!(writer.exists(Path::new("/out/b.md")));
    }
}
