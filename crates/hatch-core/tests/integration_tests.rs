//! Integration tests for hatch-core, driving the public API with hand-written
//! port implementations.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use hatch_core::prelude::*;

struct SubstitutingRenderer;

impl TemplateRenderer for SubstitutingRenderer {
    fn render(&self, spec: &ArtifactSpec, meta: &AppMetadata) -> String {
        match spec.content() {
            TemplateContent::Literal(src) => src.as_str().to_string(),
            TemplateContent::Parameterized(src) => {
                RenderContext::from_metadata(meta).render(src.as_str())
            }
        }
    }
}

/// Records every write; refuses paths listed in `deny`.
#[derive(Default)]
struct RecordingWriter {
    deny: Vec<PathBuf>,
    writes: Mutex<Vec<(PathBuf, String)>>,
}

impl ArtifactWriter for RecordingWriter {
    fn write(
        &self,
        path: &Path,
        content: &str,
        encoding: Encoding,
        _policy: OverwritePolicy,
    ) -> EmissionResult {
        if self.deny.iter().any(|p| p == path) {
            return EmissionResult::failure(path, EmissionErrorKind::PermissionDenied, "denied");
        }
        if let Err(e) = encoding.encode(content) {
            return EmissionResult::failure(path, EmissionErrorKind::EncodingError, e.to_string());
        }
        self.writes
            .lock()
            .unwrap()
            .push((path.to_path_buf(), content.to_string()));
        EmissionResult::success(path, content.len())
    }

    fn exists(&self, _path: &Path) -> bool {
        true
    }
}

fn manifest() -> ArtifactManifest {
    ArtifactManifest::new()
        .with(
            ArtifactSpec::new(
                "bridge.js",
                TemplateContent::parameterized("name: '{{APP_NAME}}' v{{APP_VERSION}}"),
                Encoding::Utf8,
            )
            .unwrap(),
        )
        .unwrap()
        .with(
            ArtifactSpec::new(
                "NOTES.md",
                TemplateContent::parameterized("# {{APP_NAME}} {{APP_VERSION}}"),
                Encoding::Utf8,
            )
            .unwrap(),
        )
        .unwrap()
        .with(
            ArtifactSpec::new(
                "run.bat",
                TemplateContent::literal("echo ✅ done"),
                Encoding::Ascii,
            )
            .unwrap(),
        )
        .unwrap()
}

#[test]
fn metadata_is_consistent_across_artifacts() {
    let writer = std::sync::Arc::new(RecordingWriter::default());
    let meta = AppMetadata::builder()
        .name("Delta")
        .version("7.1.0")
        .build()
        .unwrap();

    let service = EmitService::new(
        Box::new(SubstitutingRenderer),
        Box::new(SharedWriter(writer.clone())),
        MetadataSource::new(meta),
    );
    let report = service
        .emit(&manifest(), "/root-dir", EmitOptions::default())
        .unwrap();

    let writes = writer.writes.lock().unwrap();
    assert_eq!(writes[0].1, "name: 'Delta' v7.1.0");
    assert_eq!(writes[1].1, "# Delta 7.1.0");
    assert_eq!(report.phase(), RunPhase::Done);
}

#[test]
fn encoding_and_permission_failures_are_isolated() {
    let writer = RecordingWriter {
        deny: vec![PathBuf::from("/root-dir/bridge.js")],
        ..RecordingWriter::default()
    };
    let service = EmitService::new(
        Box::new(SubstitutingRenderer),
        Box::new(writer),
        MetadataSource::builtin(),
    );

    let report = service
        .emit(&manifest(), "/root-dir", EmitOptions::default())
        .unwrap();

    let kinds: Vec<_> = report.results().iter().map(|r| r.error_kind()).collect();
    assert_eq!(
        kinds,
        [
            Some(EmissionErrorKind::PermissionDenied),
            None,
            Some(EmissionErrorKind::EncodingError),
        ]
    );
    assert!(report.summarize().ends_with("1/3 succeeded, 2 failed"));
    assert!(EmitService::ensure_complete(&report).is_err());
}

#[test]
fn report_serializes_for_machine_output() {
    let service = EmitService::new(
        Box::new(SubstitutingRenderer),
        Box::new(RecordingWriter::default()),
        MetadataSource::builtin(),
    );
    let report = service
        .emit(&manifest(), "/root-dir", EmitOptions::default())
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["results"].as_array().unwrap().len(), 3);
    assert_eq!(json["results"][2]["error_kind"], "encoding_error");
}

/// Lets the test keep a handle on the writer after boxing it.
struct SharedWriter(std::sync::Arc<RecordingWriter>);

impl ArtifactWriter for SharedWriter {
    fn write(
        &self,
        path: &Path,
        content: &str,
        encoding: Encoding,
        policy: OverwritePolicy,
    ) -> EmissionResult {
        self.0.write(path, content, encoding, policy)
    }

    fn exists(&self, path: &Path) -> bool {
        self.0.exists(path)
    }
}
