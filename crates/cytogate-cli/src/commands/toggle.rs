//! Toggle command implementation

use crate::cli::ToggleArgs;
use crate::config_loader::open_session;
use crate::output::OutputWriter;
use crate::output_types::ToggleOutput;
use anyhow::{bail, Context, Result};
use cytogate_core::config::LayeredConfig;

pub fn execute(args: ToggleArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut workbench = open_session(config, &args.session)?;

    let (kind, target, visible) = match (args.group, args.gate) {
        (Some(group), _) => {
            let visible = workbench.toggle_group(&group)?;
            ("group", group, visible)
        }
        (None, Some(gate)) => {
            let visible = workbench.toggle_gate_visibility(&gate)?;
            ("gate", gate, visible)
        }
        (None, None) => bail!("Pass --group or --gate"),
    };

    workbench
        .save_session(&args.session)
        .with_context(|| format!("Failed to save session '{}'", args.session))?;

    if output.is_json() {
        output.result(ToggleOutput { session: args.session, target, kind, visible })?;
    } else {
        let state = if visible { "shown" } else { "hidden" };
        output.success(format!("{} '{}' is now {}", capitalize(kind), target, state));
    }

    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
