//! Diagnostics for the `hatch` binary.
//!
//! The library crates only emit events; this module owns the subscriber.
//! Diagnostics always go to stderr, because stdout carries the emission
//! report (and must stay parseable under `--output-format json`).
//!
//! `-q` maps to ERROR, no flag to WARN, and each `-v` steps one level down to
//! TRACE. A set `RUST_LOG` replaces the computed filter entirely.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events are shown without `RUST_LOG`.
const HATCH_TARGETS: [&str; 3] = ["hatch", "hatch_core", "hatch_adapters"];

/// Install the process-wide subscriber.
///
/// JSON reports get JSON log lines so a consumer reading both streams sees a
/// single format.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => hatch_filter(verbosity(args))?,
    };

    let layer = if args.output_format == OutputFormat::Json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .without_time()
            .with_ansi(!args.no_color && std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn verbosity(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Everything outside the hatch crates stays off.
fn hatch_filter(level: LevelFilter) -> anyhow::Result<EnvFilter> {
    let directives = HATCH_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    Ok(EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .parse(directives)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn global(argv: &[&str]) -> GlobalArgs {
        let mut full = vec!["hatch"];
        full.extend_from_slice(argv);
        Cli::parse_from(full).global
    }

    #[test]
    fn no_flags_shows_warnings() {
        assert_eq!(verbosity(&global(&[])), LevelFilter::WARN);
    }

    #[test]
    fn each_v_lowers_the_threshold() {
        assert_eq!(verbosity(&global(&["-v"])), LevelFilter::INFO);
        assert_eq!(verbosity(&global(&["-vv"])), LevelFilter::DEBUG);
        assert_eq!(verbosity(&global(&["-vvv"])), LevelFilter::TRACE);
        assert_eq!(verbosity(&global(&["-vvvvvv"])), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_means_errors_only() {
        assert_eq!(verbosity(&global(&["--quiet"])), LevelFilter::ERROR);
    }

    #[test]
    fn filter_names_every_hatch_crate() {
        let rendered = hatch_filter(LevelFilter::DEBUG)
            .unwrap()
            .to_string()
            .to_lowercase();
        for target in HATCH_TARGETS {
            assert!(
                rendered.contains(&format!("{target}=debug")),
                "{target} missing from {rendered}"
            );
        }
    }
}
