//! Implementation of the `hatch emit` command.
//!
//! Responsibility: resolve options from flags and config, call the core
//! emit service, and display the report. No business logic lives here.

use std::path::PathBuf;

use tracing::{info, instrument};

use hatch_core::{
    application::{EmitOptions, EmitService},
    domain::{EmissionReport, OverwritePolicy},
};

use crate::{
    cli::{EmitArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `hatch emit` command.
///
/// Dispatch sequence:
/// 1. Resolve output dir, overwrite policy and strictness
/// 2. Build the metadata record from config
/// 3. Run the emitter over the built-in manifest
/// 4. Display the report
/// 5. Fail only if `--strict` and something was not written
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: EmitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let settings = Settings::resolve(&args, &config);

    let (service, manifest) = super::desktop_emitter(&config)?;

    if output.format() != OutputFormat::Json {
        let (verb, preposition) = if settings.options.dry_run {
            ("Planning", "in")
        } else {
            ("Emitting", "into")
        };
        output.header(&format!(
            "{verb} artifacts for {} {preposition} {}",
            service.metadata().get(),
            settings.output_dir.display(),
        ))?;
    }

    let report = service.emit(&manifest, &settings.output_dir, settings.options)?;
    info!(
        succeeded = report.succeeded_count(),
        failed = report.failed_count(),
        "Emit command finished"
    );

    match output.format() {
        OutputFormat::Json => output.json(&report)?,
        OutputFormat::Human => show_report(&report, &output)?,
        _ => output.print(&report.summarize())?,
    }

    let finished = report.all_succeeded() && !settings.options.dry_run;
    if finished && !output.is_quiet() && output.format() != OutputFormat::Json {
        show_next_steps(&output)?;
    }

    if settings.strict {
        EmitService::ensure_complete(&report)?;
    }
    Ok(())
}

/// Flags layered over config.
#[derive(Debug, PartialEq, Eq)]
struct Settings {
    output_dir: PathBuf,
    options: EmitOptions,
    strict: bool,
}

impl Settings {
    fn resolve(args: &EmitArgs, config: &AppConfig) -> Self {
        let overwrite = if args.keep_existing {
            OverwritePolicy::KeepExisting
        } else {
            OverwritePolicy::from_flag(config.emit.overwrite_existing)
        };

        Self {
            output_dir: args
                .output
                .clone()
                .unwrap_or_else(|| config.emit.output_dir.clone()),
            options: EmitOptions {
                overwrite,
                dry_run: args.dry_run,
            },
            strict: args.strict || config.emit.strict,
        }
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_report(report: &EmissionReport, out: &OutputManager) -> CliResult<()> {
    for result in report.results() {
        let path = result.path().display();
        if result.is_dry_run() {
            out.info(&format!("would write {path}"))?;
        } else if result.succeeded() {
            out.success(&format!("{path} ({} bytes)", result.bytes_written()))?;
        } else {
            let kind = result
                .error_kind()
                .map(|k| k.to_string())
                .unwrap_or_default();
            out.error(&format!(
                "{path}: {kind} ({})",
                result.error_message().unwrap_or_default()
            ))?;
        }
    }

    let total = format!("{}/{} succeeded", report.succeeded_count(), report.total());
    if report.all_succeeded() {
        out.success(&total)?;
    } else {
        out.warning(&format!("{total}, {} failed", report.failed_count()))?;
    }
    Ok(())
}

fn show_next_steps(out: &OutputManager) -> CliResult<()> {
    out.print("")?;
    out.print("Next steps:")?;
    out.print("  1. Install Node.js 18+")?;
    out.print("  2. Run build-windows.bat to produce the installer")?;
    out.print("  3. The finished .exe is placed in dist/")?;
    out.print("  Use start-dev.bat for development mode.")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
