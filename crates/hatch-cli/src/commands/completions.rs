//! `hatch completions <shell>`: completion script on stdout.

use std::io;

use clap::CommandFactory;

use crate::{
    cli::{Cli, CompletionsArgs},
    error::CliResult,
};

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_owned();
    clap_complete::generate(args.shell, &mut command, bin_name, &mut io::stdout());
    Ok(())
}
