//! Gate command implementation
//!
//! Replays a sequence of frame clicks through the workbench exactly as a
//! pointer would deliver them, then names the closed ring.

use crate::cli::GateArgs;
use crate::config_loader::open_session;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::GateOutput;
use anyhow::{Context, Result};
use cytogate_core::config::LayeredConfig;
use cytogate_engine::{ClickOutcome, VertexOutcome};
use dialoguer::Input;

pub fn execute(args: GateArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut workbench = open_session(config, &args.session)?;
    workbench.start_drawing()?;

    let mut closed = false;
    for (i, pixel) in args.clicks.iter().enumerate() {
        match workbench.click(args.plot, *pixel) {
            ClickOutcome::OutOfBounds => {
                output.warning(format!(
                    "Click {} at ({}, {}) is outside the drawable area, ignored",
                    i + 1,
                    pixel[0],
                    pixel[1]
                ));
            }
            ClickOutcome::Vertex(VertexOutcome::Absorbed) => {
                output.warning(format!(
                    "Click {} is too close to the first vertex to add a new one",
                    i + 1
                ));
            }
            ClickOutcome::Vertex(VertexOutcome::Closed) => {
                closed = true;
                if i + 1 < args.clicks.len() {
                    output.warning(format!(
                        "Ring closed at click {}, ignoring the remaining {}",
                        i + 1,
                        args.clicks.len() - i - 1
                    ));
                }
                break;
            }
            outcome => tracing::debug!(click = i + 1, ?outcome, "Replayed click"),
        }
    }

    if !closed {
        return Err(errors::gate_not_closed(args.clicks.len()).into());
    }

    let name = match args.name {
        Some(name) => name,
        None if console::user_attended() && !output.is_json() => Input::<String>::new()
            .with_prompt("Gate name")
            .interact_text()
            .context("Failed to read gate name")?,
        None => return Err(errors::name_required().into()),
    };

    let gate = workbench.confirm_gate(&name, &args.color)?;
    workbench
        .save_session(&args.session)
        .with_context(|| format!("Failed to save session '{}'", args.session))?;

    if output.is_json() {
        output.result(GateOutput { session: args.session, gate })?;
    } else {
        output.success(format!(
            "Saved gate '{}' on plot {} with {} vertices",
            gate.name,
            args.plot,
            gate.vertices.len()
        ));
        output.info(format!(
            "Dye with it: cytogate dye --session {} --gate '{}'",
            args.session, gate.name
        ));
    }

    Ok(())
}
