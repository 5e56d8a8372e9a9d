//! # hatch
//!
//! Writes the build artifacts of an Electron desktop application
//! (`preload.js`, `README.md`, `build-windows.bat`, `start-dev.bat`) from one
//! shared metadata record.
//!
//! Arguments are parsed first so `--help` and `--version` never touch config
//! or logging. Everything after that either succeeds or ends in a single
//! [`CliError`], which decides the exit status:
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! |  0   | Run finished, even if some artifacts failed         |
//! |  1   | Internal error, or `--strict` with failed artifacts |
//! |  2   | Invalid arguments or input                          |
//! |  4   | Configuration problem, including bad `[metadata]`   |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let mut cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = logging::init_logging(&cli.global) {
        eprintln!("hatch: {e:#}");
        return ExitCode::FAILURE;
    }

    let verbose = cli.global.verbose > 0;
    match run(&mut cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.log();
            eprint!("{}", err.render(verbose, std::io::stderr().is_terminal()));
            ExitCode::from(err.exit_code())
        }
    }
}

#[instrument(skip_all)]
fn run(cli: &mut Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.global.config.as_ref())
        .map_err(|e| CliError::config(format!("{e:#}")))?;
    let output = OutputManager::new(&cli.global, &config);
    let command = cli.command_or_default();
    debug!(?command, format = ?output.format(), "dispatching");

    match command {
        Commands::Emit(args) => commands::emit::execute(args, config, output),
        Commands::List(args) => commands::list::execute(args, config, output),
        Commands::Init(args) => commands::init::execute(args, config, output),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_and_author_come_from_the_manifest() {
        let command = Cli::command();
        assert_eq!(command.get_version(), Some(env!("CARGO_PKG_VERSION")));
        assert!(command.get_author().is_some());
    }

    #[test]
    fn every_subcommand_is_registered() {
        let command = Cli::command();
        let names: Vec<_> = command.get_subcommands().map(|c| c.get_name()).collect();
        for expected in ["emit", "list", "init", "completions", "config"] {
            assert!(names.contains(&expected), "{expected} missing: {names:?}");
        }
    }
}
