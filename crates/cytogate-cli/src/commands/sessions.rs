//! Sessions command implementation

use crate::cli::SessionsArgs;
use crate::config_loader::open_workbench;
use crate::output::OutputWriter;
use crate::output_types::{ScratchInfo, ScratchOutput, SessionInfo, SessionsOutput};
use anyhow::{Context, Result};
use cytogate_core::config::LayeredConfig;
use tabled::Tabled;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub fn execute(args: SessionsArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    if args.scratch {
        return list_scratch(config, output);
    }

    let mut sessions: Vec<SessionInfo> = open_workbench(config)
        .list_sessions()
        .context("Failed to read the session store")?
        .into_iter()
        .map(|meta| SessionInfo { name: meta.name, saved_at: meta.timestamp })
        .collect();

    // Store order is insertion order; show the newest first
    sessions.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));

    if output.is_json() {
        output.result(SessionsOutput { sessions })?;
    } else {
        output.section("Saved Sessions");

        #[derive(Tabled)]
        struct SessionRow {
            #[tabled(rename = "Name")]
            name: String,
            #[tabled(rename = "Saved At")]
            saved_at: String,
        }

        let rows = sessions
            .iter()
            .map(|s| SessionRow { name: s.name.clone(), saved_at: s.saved_at.format(TIME_FORMAT).to_string() })
            .collect();
        output.table::<SessionRow>(rows);
        output.kv("Store", config.store_path.value.display());
    }

    Ok(())
}

fn list_scratch(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let entries: Vec<ScratchInfo> = open_workbench(config)
        .scratch_entries()
        .context("Failed to read the scratch log")?
        .into_iter()
        .map(|entry| ScratchInfo {
            drawn_at: entry.timestamp,
            plot: entry.gate.plot(),
            vertex_count: entry.gate.vertices.len(),
            gate: entry.gate.name,
        })
        .collect();

    if output.is_json() {
        output.result(ScratchOutput { entries })?;
    } else {
        output.section("Drawn Gates");

        #[derive(Tabled)]
        struct ScratchRow {
            #[tabled(rename = "Drawn At")]
            drawn_at: String,
            #[tabled(rename = "Gate")]
            gate: String,
            #[tabled(rename = "Plot")]
            plot: String,
            #[tabled(rename = "Vertices")]
            vertices: usize,
        }

        let rows = entries
            .into_iter()
            .map(|e| ScratchRow {
                drawn_at: e.drawn_at.format(TIME_FORMAT).to_string(),
                gate: e.gate,
                plot: e.plot.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
                vertices: e.vertex_count,
            })
            .collect();
        output.table::<ScratchRow>(rows);
    }

    Ok(())
}
