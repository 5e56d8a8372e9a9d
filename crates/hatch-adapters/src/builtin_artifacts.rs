//! Built-in artifact catalogue.
//!
//! The four files that bootstrap an Electron desktop build, compiled into the
//! binary from `templates/`. Every template is parameterized on the shared
//! metadata record, so the application name and version written into the
//! bridge script always match the ones in the documentation.
//!
//! | Path | Purpose |
//! |------|---------|
//! | `preload.js` | IPC bridge exposing `electronAPI` and `APP_METADATA` |
//! | `README.md` | end-user and developer documentation |
//! | `build-windows.bat` | install, rebuild native deps, clean, build, report |
//! | `start-dev.bat` | development-mode launcher |

use hatch_core::domain::{ArtifactManifest, ArtifactSpec, DomainError, Encoding, TemplateContent};
use tracing::debug;

pub const PRELOAD_JS: &str = "preload.js";
pub const README_MD: &str = "README.md";
pub const BUILD_WINDOWS_BAT: &str = "build-windows.bat";
pub const START_DEV_BAT: &str = "start-dev.bat";

const PRELOAD_TEMPLATE: &str = include_str!("../templates/preload.js.tpl");
const README_TEMPLATE: &str = include_str!("../templates/README.md.tpl");
const BUILD_WINDOWS_TEMPLATE: &str = include_str!("../templates/build-windows.bat.tpl");
const START_DEV_TEMPLATE: &str = include_str!("../templates/start-dev.bat.tpl");

/// The Electron desktop manifest, in emission order.
pub fn electron_desktop_manifest() -> Result<ArtifactManifest, DomainError> {
    let manifest = ArtifactManifest::new()
        .with(
            ArtifactSpec::new(
                PRELOAD_JS,
                TemplateContent::parameterized(PRELOAD_TEMPLATE),
                Encoding::Utf8,
            )?
            .with_description("security bridge exposing IPC and app metadata"),
        )?
        .with(
            ArtifactSpec::new(
                README_MD,
                TemplateContent::parameterized(README_TEMPLATE),
                Encoding::Utf8,
            )?
            .with_description("project documentation"),
        )?
        .with(
            ArtifactSpec::new(
                BUILD_WINDOWS_BAT,
                TemplateContent::parameterized(BUILD_WINDOWS_TEMPLATE),
                Encoding::Utf8,
            )?
            .with_description("Windows build pipeline"),
        )?
        .with(
            ArtifactSpec::new(
                START_DEV_BAT,
                TemplateContent::parameterized(START_DEV_TEMPLATE),
                Encoding::Utf8,
            )?
            .with_description("development-mode launcher"),
        )?;

    debug!(count = manifest.len(), "built-in manifest loaded");
    Ok(manifest)
}
