//! Local filesystem writer using std::fs.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::{instrument, trace};

use hatch_core::{
    application::ports::ArtifactWriter,
    domain::{EmissionErrorKind, EmissionResult, Encoding, OverwritePolicy, Unrepresentable},
};

/// Production writer.
///
/// Each write opens the target, streams the encoded bytes, flushes and syncs,
/// and drops the handle before returning. Nothing escapes as a panic or error:
/// every failure becomes an [`EmissionResult`].
#[derive(Debug, Clone, Copy)]
pub struct LocalWriter;

impl LocalWriter {
    /// Create a new local writer adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
enum WriteError {
    #[error("{0}")]
    Encoding(Unrepresentable),

    #[error("file exists and overwrite is disabled")]
    Exists,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl WriteError {
    fn kind(&self) -> EmissionErrorKind {
        match self {
            Self::Encoding(_) => EmissionErrorKind::EncodingError,
            Self::Exists => EmissionErrorKind::AlreadyExists,
            Self::Io(e) => EmissionErrorKind::from_io(e),
        }
    }
}

impl ArtifactWriter for LocalWriter {
    #[instrument(skip_all, fields(path = %path.display(), encoding = %encoding))]
    fn write(
        &self,
        path: &Path,
        content: &str,
        encoding: Encoding,
        policy: OverwritePolicy,
    ) -> EmissionResult {
        match write_scoped(path, content, encoding, policy) {
            Ok(bytes) => {
                trace!(bytes, "written");
                EmissionResult::success(path, bytes)
            }
            Err(e) => EmissionResult::failure(path, e.kind(), e.to_string()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// The handle lives only inside this function; every `?` drops it.
fn write_scoped(
    path: &Path,
    content: &str,
    encoding: Encoding,
    policy: OverwritePolicy,
) -> Result<usize, WriteError> {
    let bytes = encoding.encode(content).map_err(WriteError::Encoding)?;

    let file = open(path, policy)?;
    let mut out = BufWriter::new(file);
    out.write_all(&bytes)?;
    let file = out.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;

    Ok(bytes.len())
}

fn open(path: &Path, policy: OverwritePolicy) -> Result<File, WriteError> {
    let mut options = OpenOptions::new();
    options.write(true);

    match policy {
        OverwritePolicy::Overwrite => {
            options.create(true).truncate(true);
        }
        OverwritePolicy::KeepExisting => {
            options.create_new(true);
        }
    }

    options.open(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => WriteError::Exists,
        _ => WriteError::Io(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preload.js");

        let result = LocalWriter::new().write(&path, "hello", Encoding::Utf8, OverwritePolicy::Overwrite);

        assert!(result.succeeded());
        assert_eq!(result.bytes_written(), 5);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn overwrite_replaces_longer_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preload.js");
        fs::write(&path, "some much longer unrelated content").unwrap();

        LocalWriter::new().write(&path, "new", Encoding::Utf8, OverwritePolicy::Overwrite);

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn keep_existing_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "mine").unwrap();

        let result =
            LocalWriter::new().write(&path, "generated", Encoding::Utf8, OverwritePolicy::KeepExisting);

        assert_eq!(result.error_kind(), Some(EmissionErrorKind::AlreadyExists));
        assert_eq!(fs::read_to_string(&path).unwrap(), "mine");
    }

    #[test]
    fn missing_parent_is_path_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("start-dev.bat");

        let result = LocalWriter::new().write(&path, "x", Encoding::Utf8, OverwritePolicy::Overwrite);

        assert_eq!(result.error_kind(), Some(EmissionErrorKind::PathNotFound));
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn unencodable_content_is_reported_and_nothing_is_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build-windows.bat");

        let result = LocalWriter::new().write(&path, "echo ✅", Encoding::Ascii, OverwritePolicy::Overwrite);

        assert_eq!(result.error_kind(), Some(EmissionErrorKind::EncodingError));
        assert!(result.error_message().unwrap().contains("U+2705"));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn read_only_target_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preload.js");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();

        // Privileged users ignore mode bits; the mapping itself is covered by
        // io_permission_failure_maps_to_permission_denied.
        if OpenOptions::new().write(true).open(&path).is_ok() {
            eprintln!("skipping read_only_target_is_permission_denied: process bypasses file mode bits");
            return;
        }

        let result = LocalWriter::new().write(&path, "new", Encoding::Utf8, OverwritePolicy::Overwrite);

        assert_eq!(result.error_kind(), Some(EmissionErrorKind::PermissionDenied));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn io_permission_failure_maps_to_permission_denied() {
        for io_kind in [io::ErrorKind::PermissionDenied, io::ErrorKind::ReadOnlyFilesystem] {
            let err = WriteError::from(io::Error::new(io_kind, "denied"));
            assert_eq!(err.kind(), EmissionErrorKind::PermissionDenied);
        }
        assert_eq!(WriteError::Exists.kind(), EmissionErrorKind::AlreadyExists);
    }
}
