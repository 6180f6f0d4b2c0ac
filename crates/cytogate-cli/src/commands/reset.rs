//! Reset command implementation

use crate::cli::ResetArgs;
use crate::config_loader::open_session;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use cytogate_core::config::LayeredConfig;

pub fn execute(args: ResetArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut workbench = open_session(config, &args.session)?;
    let gates = workbench.gates().len();
    let groups = workbench.groups().len();

    workbench.reset()?;
    workbench
        .save_session(&args.session)
        .with_context(|| format!("Failed to save session '{}'", args.session))?;

    if output.is_json() {
        output.result(serde_json::json!({
            "session": args.session,
            "discarded_gates": gates,
            "discarded_groups": groups,
        }))?;
    } else {
        output.success(format!(
            "Reset session '{}': discarded {} gates and {} groups",
            args.session, gates, groups
        ));
    }

    Ok(())
}
