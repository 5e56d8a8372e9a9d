//! Command-line surface of `hatch`: flags, subcommands, value enums.
//! Handlers live in [`crate::commands`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

const ROOT_EXAMPLES: &str = "\
Examples:
  hatch                        same as `hatch emit`
  hatch emit -o ./desktop      write into ./desktop (must exist)
  hatch emit --dry-run         show what would be written
  hatch list --format json
  hatch completions bash > ~/.local/share/bash-completion/completions/hatch";

/// Emit the build artifacts of an Electron desktop app.
///
/// Writes preload.js, README.md, build-windows.bat and start-dev.bat into a
/// directory, all rendered from one shared metadata record. Running it again
/// reproduces the same bytes.
#[derive(Debug, Parser)]
#[command(name = "hatch", version, author, after_help = ROOT_EXAMPLES)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Takes the parsed subcommand; a bare `hatch` runs `emit` with defaults.
    pub fn command_or_default(&mut self) -> Commands {
        self.command
            .take()
            .unwrap_or_else(|| Commands::Emit(EmitArgs::default()))
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the artifacts into a directory
    #[command(visible_alias = "e")]
    Emit(EmitArgs),

    /// Show the artifacts that would be written, with their sizes
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Write a default configuration file
    Init(InitArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),

    /// Inspect the effective configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// `hatch emit`. Unset flags fall back to the `[emit]` config section.
#[derive(Debug, Default, Args)]
pub struct EmitArgs {
    /// Directory to write into; it is never created [default: emit.output_dir]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Render and check every target, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Leave files that already exist untouched and report them
    #[arg(long)]
    pub keep_existing: bool,

    /// Exit with status 1 if any artifact was not written
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Layout of the catalogue
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Path, size, encoding and purpose per row
    Table,
    /// Paths only
    List,
    /// Array of planned artifacts
    Json,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write ./.hatch.toml instead of the per-user config file
    #[arg(long)]
    pub local: bool,

    /// Replace a config file that already exists
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one value, e.g. `hatch config get metadata.version`
    Get { key: String },
    /// Print every value as TOML
    List,
    /// Print where the per-user config file lives
    Path,
}
