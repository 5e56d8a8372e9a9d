//! Flags shared by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum, builder::FalseyValueParser};

#[derive(Debug, Args)]
#[command(next_help_heading = "Global options")]
pub struct GlobalArgs {
    /// More diagnostics on stderr: -v run progress, -vv each artifact,
    /// -vvv rendering detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print nothing but errors (and JSON documents)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never colour output; also enabled by NO_COLOR set to anything but
    /// an empty string, 0, false, no or off
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Read configuration from FILE instead of the usual locations
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How the report is printed
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// Rendering of everything written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped
    #[default]
    Auto,
    /// Coloured, with symbols
    Human,
    /// The report summary exactly as the emitter formats it
    Plain,
    /// One JSON document
    Json,
}

impl OutputFormat {
    /// Reads the `output.format` config value. Anything unrecognised is
    /// treated as `auto`.
    pub fn from_config(value: &str) -> Self {
        Self::from_str(value.trim(), true).unwrap_or_default()
    }
}
