//! Import command implementation

use crate::cli::ImportArgs;
use crate::config_loader::open_workbench;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::ImportOutput;
use anyhow::{Context, Result};
use cytogate_core::config::LayeredConfig;
use cytogate_core::formats::{read_measurements, MeasurementColumns};
use cytogate_engine::{Workbench, WorkbenchOptions};
use cytogate_store::JsonFileStore;

pub fn execute(args: ImportArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let existing = open_workbench(config)
        .list_sessions()
        .context("Failed to read the session store")?;
    if !args.force && existing.iter().any(|s| s.name == args.session) {
        return Err(errors::session_exists(&args.session).into());
    }

    let columns = MeasurementColumns {
        a_x: args.column_a,
        b_x: args.column_b,
        y: args.column_y,
    };
    let measurements = read_measurements(&args.path, &columns)?;

    if measurements.dropped_rows > 0 {
        output.warning(format!(
            "Skipped {} rows with missing or non-numeric measurements",
            measurements.dropped_rows
        ));
    }

    let point_count = measurements.points.len();
    let mut workbench = Workbench::new(
        measurements.points,
        Box::new(JsonFileStore::new(&config.store_path.value)),
        WorkbenchOptions::from_config(config),
    );
    workbench
        .save_session(&args.session)
        .with_context(|| format!("Failed to save session '{}'", args.session))?;

    if output.is_json() {
        output.result(ImportOutput {
            session: args.session,
            source: args.path.display().to_string(),
            point_count,
            dropped_rows: measurements.dropped_rows,
        })?;
    } else {
        output.success(format!(
            "Imported {} points from {} into session '{}'",
            point_count,
            args.path.display(),
            args.session
        ));
        output.info(format!(
            "Draw a gate: cytogate gate --session {} --plot A --click X,Y ...",
            args.session
        ));
    }

    Ok(())
}
