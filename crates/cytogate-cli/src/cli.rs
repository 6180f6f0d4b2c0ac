use clap::{Parser, Subcommand};
use cytogate_core::models::{Coord, Plot};
use std::path::PathBuf;

/// Cytogate - Polygon gating for two-plot cytometry data
#[derive(Parser, Debug)]
#[command(name = "cytogate")]
#[command(about = "Draw gates over cytometry scatter plots and dye points into groups", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./cytogate.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Session store file, overriding the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a measurement CSV into a new session
    Import(ImportArgs),

    /// List saved sessions
    Sessions(SessionsArgs),

    /// Show the points, gates and groups of a session
    Show(ShowArgs),

    /// Draw a gate by replaying clicks on a plot
    Gate(GateArgs),

    /// Classify points with a saved gate
    Dye(DyeArgs),

    /// Toggle the visibility of a group or a gate
    Toggle(ToggleArgs),

    /// Discard all gates and groups of a session
    Reset(ResetArgs),

    /// Delete a saved session, or one of its gates
    Delete(DeleteArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Measurement CSV file
    pub path: PathBuf,

    /// Session to create
    #[arg(long)]
    pub session: String,

    /// Column holding the plot A X measurement
    #[arg(long, default_value = "CD45-KrO")]
    pub column_a: String,

    /// Column holding the plot B X measurement
    #[arg(long, default_value = "CD19-PB")]
    pub column_b: String,

    /// Column holding the shared Y measurement
    #[arg(long, default_value = "SS INT LIN")]
    pub column_y: String,

    /// Overwrite an existing session with the same name
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct SessionsArgs {
    /// List the scratch log of drawn gates instead
    #[arg(long)]
    pub scratch: bool,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    #[arg(long)]
    pub session: String,

    /// Also list every point with its display color
    #[arg(long)]
    pub points: bool,
}

#[derive(Parser, Debug)]
pub struct GateArgs {
    #[arg(long)]
    pub session: String,

    /// Plot the gate is drawn on (A or B)
    #[arg(long)]
    pub plot: Plot,

    /// Frame pixel position "X,Y"; repeat once per click, ending near the first
    #[arg(long = "click", value_name = "X,Y", required = true, value_parser = parse_pixel)]
    pub clicks: Vec<Coord>,

    /// Gate name (prompted for when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Gate color
    #[arg(long, default_value = "#FF0000")]
    pub color: String,
}

#[derive(Parser, Debug)]
pub struct DyeArgs {
    #[arg(long)]
    pub session: String,

    /// Saved gate to dye with
    #[arg(long)]
    pub gate: String,

    /// Busy period in milliseconds, overriding the configured one
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct ToggleArgs {
    #[arg(long)]
    pub session: String,

    /// Dyed group to show or hide
    #[arg(long, conflicts_with = "gate", required_unless_present = "gate")]
    pub group: Option<String>,

    /// Saved gate to show or hide
    #[arg(long)]
    pub gate: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ResetArgs {
    #[arg(long)]
    pub session: String,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    #[arg(long)]
    pub session: String,

    /// Remove only this gate from the session
    #[arg(long)]
    pub gate: Option<String>,
}

/// Parse "X,Y" into a pixel coordinate
pub fn parse_pixel(raw: &str) -> Result<Coord, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", raw))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("invalid X in '{}'", raw))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("invalid Y in '{}'", raw))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(format!("non-finite coordinate in '{}'", raw));
    }
    Ok([x, y])
}
