//! `hatch list`: the artifact catalogue, rendered but not written.

use hatch_core::application::PlannedArtifact;

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (service, manifest) = super::desktop_emitter(&config)?;
    let planned = service.plan(&manifest)?;

    match args.format {
        ListFormat::Table => {
            output.header(&format!("Artifacts for {}:", service.metadata().get()))?;
            for line in table_rows(&planned) {
                output.print(&line)?;
            }
        }
        // JSON bypasses quiet mode so it stays parseable in pipes.
        ListFormat::Json => output.json(&planned)?,
        ListFormat::List => {
            for artifact in &planned {
                output.print(&artifact.path)?;
            }
        }
    }

    Ok(())
}

fn table_rows(planned: &[PlannedArtifact]) -> Vec<String> {
    let width = planned.iter().map(|a| a.path.len()).max().unwrap_or(0);
    planned
        .iter()
        .map(|a| {
            format!(
                "  {:<width$}  {:>7} B  {:<6} {}",
                a.path,
                a.bytes,
                a.encoding.to_string(),
                a.description
            )
        })
        .collect()
}
