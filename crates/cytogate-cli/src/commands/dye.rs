//! Dye command implementation

use crate::cli::DyeArgs;
use crate::config_loader::open_session;
use crate::output::OutputWriter;
use crate::output_types::DyeOutput;
use anyhow::{Context, Result};
use cytogate_core::config::{CliConfigOverrides, LayeredConfig};

pub fn execute(args: DyeArgs, mut config: LayeredConfig, output: &OutputWriter) -> Result<()> {
    config.update_from_cli(CliConfigOverrides { dye_delay_ms: args.delay_ms, ..Default::default() });

    let mut workbench = open_session(&config, &args.session)?;

    output.info(format!("Dyeing with gate '{}'...", args.gate));
    let report = workbench.dye_blocking(&args.gate)?;
    workbench
        .save_session(&args.session)
        .with_context(|| format!("Failed to save session '{}'", args.session))?;

    if output.is_json() {
        output.result(DyeOutput { session: args.session, report })?;
    } else {
        output.success(format!(
            "Dyed {} of {} points into group '{}' ({})",
            report.matched, report.total, report.gate, report.color
        ));
    }

    Ok(())
}
