//! Dyeing: classify points by containment in a gate.

use cytogate_core::error::{CytogateError, Result};
use cytogate_core::models::{Gate, GroupVisibility, Plot, Point};
use cytogate_core::PointStore;
use cytogate_geo::point_in_polygon;
use serde::Serialize;

/// Summary of one dye operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DyeReport {
    pub gate: String,
    pub color: String,
    pub plot: Plot,
    /// Points that landed inside the gate
    pub matched: usize,
    pub total: usize,
}

/// Return `points` with every point inside `gate` assigned to it.
///
/// Each point is tested on the projection of the plot the gate was drawn on.
/// Points outside the gate keep whatever assignment they had.
pub fn dye(gate: &Gate, points: &[Point]) -> Vec<Point> {
    let Some(plot) = gate.plot() else {
        return points.to_vec();
    };
    let ring = gate.ring();

    points
        .iter()
        .map(|point| {
            let mut point = point.clone();
            if point_in_polygon(point.coord(plot), &ring) {
                point.classify(gate.name.as_str(), gate.color.as_str());
            }
            point
        })
        .collect()
}

/// Count how many points fall inside a gate
pub fn count_matches(gate: &Gate, points: &[Point]) -> usize {
    let Some(plot) = gate.plot() else {
        return 0;
    };
    let ring = gate.ring();
    points.iter().filter(|p| point_in_polygon(p.coord(plot), &ring)).count()
}

/// Consume the saved gate `name`: dye the store, drop the gate, show its group
pub(crate) fn dye_saved_gate(
    name: &str,
    store: &mut PointStore,
    gates: &mut Vec<Gate>,
    visibility: &mut GroupVisibility,
) -> Result<DyeReport> {
    let index = gates
        .iter()
        .position(|g| g.name == name)
        .ok_or_else(|| CytogateError::GateNotFound { name: name.to_string() })?;

    let gate = &gates[index];
    let plot = gate.plot().ok_or(CytogateError::DegenerateGate { found: 0 })?;
    let matched = count_matches(gate, store.points());
    store.apply(dye(gate, store.points()))?;

    let gate = gates.remove(index);
    visibility.insert(gate.name.clone(), true);

    tracing::info!(gate = %gate.name, plot = %plot, matched, total = store.len(), "Dyed points");

    Ok(DyeReport { gate: gate.name, color: gate.color, plot, matched, total: store.len() })
}
