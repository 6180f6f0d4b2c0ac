//! Delete command implementation

use crate::cli::DeleteArgs;
use crate::config_loader::{open_session, open_workbench};
use crate::errors;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use cytogate_core::config::LayeredConfig;

pub fn execute(args: DeleteArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    if let Some(gate) = args.gate {
        return delete_gate(&args.session, &gate, config, output);
    }

    let removed = open_workbench(config)
        .delete_session(&args.session)
        .with_context(|| format!("Failed to delete session '{}'", args.session))?;
    if !removed {
        return Err(errors::session_not_found(&args.session).into());
    }

    if output.is_json() {
        output.result(serde_json::json!({ "session": args.session, "deleted": true }))?;
    } else {
        output.success(format!("Deleted session '{}'", args.session));
    }

    Ok(())
}

fn delete_gate(session: &str, gate: &str, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut workbench = open_session(config, session)?;
    let removed = workbench.remove_gate(gate)?;
    workbench
        .save_session(session)
        .with_context(|| format!("Failed to save session '{}'", session))?;

    if output.is_json() {
        output.result(serde_json::json!({ "session": session, "deleted_gate": removed }))?;
    } else {
        output.success(format!("Removed gate '{}' from session '{}'", removed.name, session));
    }

    Ok(())
}
