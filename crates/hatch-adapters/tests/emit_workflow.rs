//! End-to-end emission through the real adapters.

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use hatch_adapters::{LocalWriter, MemoryWriter, MetadataRenderer, electron_desktop_manifest};
use hatch_core::{
    application::{EmitOptions, EmitService},
    domain::{AppMetadata, EmissionErrorKind, MetadataSource, OverwritePolicy, RunPhase},
};
use tempfile::TempDir;

const PATHS: [&str; 4] = ["preload.js", "README.md", "build-windows.bat", "start-dev.bat"];

fn local_service(metadata: MetadataSource) -> EmitService {
    EmitService::new(
        Box::new(MetadataRenderer::new()),
        Box::new(LocalWriter::new()),
        metadata,
    )
}

fn emit_into(dir: &Path) -> hatch_core::domain::EmissionReport {
    let manifest = electron_desktop_manifest().unwrap();
    local_service(MetadataSource::builtin())
        .emit(&manifest, dir, EmitOptions::default())
        .unwrap()
}

#[test]
fn fresh_directory_gets_exactly_four_files() {
    let dir = TempDir::new().unwrap();

    let report = emit_into(dir.path());

    assert_eq!(report.phase(), RunPhase::Done);
    assert!(report.summarize().ends_with("4/4 succeeded"));
    for path in PATHS {
        assert!(dir.path().join(path).is_file(), "{path} missing");
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 4);
}

#[test]
fn second_run_is_byte_identical() {
    let dir = TempDir::new().unwrap();

    emit_into(dir.path());
    let first: Vec<Vec<u8>> = PATHS
        .iter()
        .map(|p| fs::read(dir.path().join(p)).unwrap())
        .collect();

    let later = AppMetadata::builder()
        .build_timestamp(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        .build()
        .unwrap();
    local_service(MetadataSource::new(later))
        .emit(&electron_desktop_manifest().unwrap(), dir.path(), EmitOptions::default())
        .unwrap();

    for (path, before) in PATHS.iter().zip(first) {
        assert_eq!(fs::read(dir.path().join(path)).unwrap(), before, "{path} changed");
    }
}

#[test]
fn existing_preload_is_fully_replaced() {
    let dir = TempDir::new().unwrap();
    let preload = dir.path().join("preload.js");
    fs::write(&preload, "x".repeat(64 * 1024)).unwrap();

    let report = emit_into(dir.path());

    assert!(report.all_succeeded());
    let content = fs::read_to_string(&preload).unwrap();
    assert!(content.starts_with("const { contextBridge, ipcRenderer } = require('electron');"));
    assert!(!content.contains("xxxx"));
}

#[test]
fn bridge_and_docs_share_name_and_version() {
    let dir = TempDir::new().unwrap();
    let meta = AppMetadata::builder()
        .name("Ledger Lite")
        .version("4.2.0")
        .build()
        .unwrap();

    local_service(MetadataSource::new(meta))
        .emit(&electron_desktop_manifest().unwrap(), dir.path(), EmitOptions::default())
        .unwrap();

    let preload = fs::read_to_string(dir.path().join("preload.js")).unwrap();
    let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(preload.contains("name: 'Ledger Lite'") && preload.contains("version: '4.2.0'"));
    assert!(readme.contains("Ledger Lite") && readme.contains("4.2.0"));
}

#[test]
fn read_only_target_fails_alone() {
    let writer = MemoryWriter::new()
        .with_dir("/project")
        .with_read_only("/project/preload.js");
    let service = EmitService::new(
        Box::new(MetadataRenderer::new()),
        Box::new(writer.clone()),
        MetadataSource::builtin(),
    );

    let report = service
        .emit(&electron_desktop_manifest().unwrap(), "/project", EmitOptions::default())
        .unwrap();

    assert_eq!(
        report.results()[0].error_kind(),
        Some(EmissionErrorKind::PermissionDenied)
    );
    assert_eq!(report.succeeded_count(), 3);
    assert!(report.summarize().ends_with("3/4 succeeded, 1 failed"));
    assert_eq!(writer.list_files().len(), 3);
}

#[test]
fn missing_output_directory_fails_every_artifact() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("not-there");

    let report = emit_into(&missing);

    assert_eq!(report.phase(), RunPhase::Done);
    assert_eq!(report.failed_count(), 4);
    assert!(report
        .results()
        .iter()
        .all(|r| r.error_kind() == Some(EmissionErrorKind::PathNotFound)));
    assert!(!missing.exists());
}

#[test]
fn keep_existing_preserves_user_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), "my notes").unwrap();

    let options = EmitOptions {
        overwrite: OverwritePolicy::KeepExisting,
        dry_run: false,
    };
    let report = local_service(MetadataSource::builtin())
        .emit(&electron_desktop_manifest().unwrap(), dir.path(), options)
        .unwrap();

    assert_eq!(
        report.results()[1].error_kind(),
        Some(EmissionErrorKind::AlreadyExists)
    );
    assert_eq!(report.succeeded_count(), 3);
    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), "my notes");
}

#[test]
fn keep_existing_skips_seeded_file_in_memory() {
    let writer = MemoryWriter::new()
        .with_dir("/project")
        .with_file("/project/start-dev.bat", "@echo custom");
    let service = EmitService::new(
        Box::new(MetadataRenderer::new()),
        Box::new(writer.clone()),
        MetadataSource::builtin(),
    );
    let options = EmitOptions {
        overwrite: OverwritePolicy::KeepExisting,
        dry_run: false,
    };

    let report = service
        .emit(&electron_desktop_manifest().unwrap(), "/project", options)
        .unwrap();

    assert_eq!(
        report.results()[3].error_kind(),
        Some(EmissionErrorKind::AlreadyExists)
    );
    assert_eq!(report.succeeded_count(), 3);
    assert_eq!(
        writer.read_file("/project/start-dev.bat").as_deref(),
        Some("@echo custom")
    );
}

#[test]
fn dry_run_leaves_directory_empty() {
    let dir = TempDir::new().unwrap();

    let options = EmitOptions {
        dry_run: true,
        ..EmitOptions::default()
    };
    let report = local_service(MetadataSource::builtin())
        .emit(&electron_desktop_manifest().unwrap(), dir.path(), options)
        .unwrap();

    assert!(report.all_succeeded());
    assert!(report.results().iter().all(|r| r.is_dry_run()));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn summary_order_is_stable_across_runs() {
    let dir = TempDir::new().unwrap();

    let first = emit_into(dir.path()).summarize();
    let second = emit_into(dir.path()).summarize();

    assert_eq!(first, second);
    let order: Vec<_> = first
        .lines()
        .take(4)
        .map(|l| l.rsplit(['/', '\\']).next().unwrap_or(l).split(' ').next().unwrap_or(""))
        .map(str::to_string)
        .collect();
    assert_eq!(order, PATHS);
}
