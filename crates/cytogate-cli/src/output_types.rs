use chrono::{DateTime, Utc};
use cytogate_core::models::{Gate, Plot};
use cytogate_core::GroupSummary;
use cytogate_engine::DyeReport;
use serde::Serialize;

/// Output for import command
#[derive(Debug, Serialize)]
pub struct ImportOutput {
    pub session: String,
    pub source: String,
    pub point_count: usize,
    pub dropped_rows: usize,
}

/// Output for sessions command
#[derive(Debug, Serialize)]
pub struct SessionsOutput {
    pub sessions: Vec<SessionInfo>,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub name: String,
    pub saved_at: DateTime<Utc>,
}

/// Output for sessions --scratch
#[derive(Debug, Serialize)]
pub struct ScratchOutput {
    pub entries: Vec<ScratchInfo>,
}

#[derive(Debug, Serialize)]
pub struct ScratchInfo {
    pub drawn_at: DateTime<Utc>,
    pub gate: String,
    pub plot: Option<Plot>,
    pub vertex_count: usize,
}

/// Output for show command
#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub session: String,
    pub point_count: usize,
    pub unclassified_count: usize,
    pub gates: Vec<GateInfo>,
    pub groups: Vec<GroupSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<PointInfo>>,
}

#[derive(Debug, Serialize)]
pub struct GateInfo {
    pub name: String,
    pub color: String,
    pub plot: Option<Plot>,
    pub vertex_count: usize,
    pub visible: bool,
    /// Absolute ring area in data units
    pub area: f64,
    /// Label anchor in data space
    pub centroid: Option<[f64; 2]>,
    /// Points the gate would dye right now
    pub matches: usize,
}

#[derive(Debug, Serialize)]
pub struct PointInfo {
    pub a: [f64; 2],
    pub b: [f64; 2],
    pub group: Option<String>,
    pub display_color: String,
}

/// Output for gate command
#[derive(Debug, Serialize)]
pub struct GateOutput {
    pub session: String,
    pub gate: Gate,
}

/// Output for dye command
#[derive(Debug, Serialize)]
pub struct DyeOutput {
    pub session: String,
    #[serde(flatten)]
    pub report: DyeReport,
}

/// Output for toggle command
#[derive(Debug, Serialize)]
pub struct ToggleOutput {
    pub session: String,
    pub target: String,
    pub kind: &'static str,
    pub visible: bool,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub closure_threshold: ConfigEntry,
    pub dye_delay_ms: ConfigEntry,
    pub default_color: ConfigEntry,
    pub store_path: ConfigEntry,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: String,
}
