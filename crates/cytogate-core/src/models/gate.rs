use serde::{Deserialize, Serialize};

use super::point::{Coord, Plot};
use crate::error::{CytogateError, Result};

/// A polygon vertex in data space, tagged with the plot it was drawn on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub plot: Plot,
}

impl Vertex {
    pub fn new(x: f64, y: f64, plot: Plot) -> Self {
        Self { x, y, plot }
    }

    pub fn coord(&self) -> Coord {
        [self.x, self.y]
    }
}

/// A named, colored closed ring of vertices used to dye points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Ring vertices in drawing order
    #[serde(rename = "points")]
    pub vertices: Vec<Vertex>,

    /// Color handed to points dyed by this gate
    pub color: String,

    /// Unique name among saved gates, becomes the group name on dyeing
    pub name: String,

    /// Display flag; has no effect on classification
    pub visible: bool,
}

impl Gate {
    /// Create a visible gate, checking the ring invariants
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        vertices: Vec<Vertex>,
    ) -> Result<Self> {
        let gate = Self { vertices, color: color.into(), name: name.into(), visible: true };
        gate.validate()?;
        Ok(gate)
    }

    /// Check that the ring has at least 3 vertices on a single plot
    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() < 3 {
            return Err(CytogateError::DegenerateGate { found: self.vertices.len() });
        }
        let plot = self.vertices[0].plot;
        if self.vertices.iter().any(|v| v.plot != plot) {
            return Err(CytogateError::MixedPlotGate);
        }
        Ok(())
    }

    /// The plot every vertex was drawn on
    pub fn plot(&self) -> Option<Plot> {
        self.vertices.first().map(|v| v.plot)
    }

    /// Vertices as plain coordinates
    pub fn ring(&self) -> Vec<Coord> {
        self.vertices.iter().map(Vertex::coord).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(plot: Plot) -> Vec<Vertex> {
        vec![
            Vertex::new(0.0, 0.0, plot),
            Vertex::new(10.0, 0.0, plot),
            Vertex::new(10.0, 10.0, plot),
            Vertex::new(0.0, 10.0, plot),
        ]
    }

    #[test]
    fn test_new_gate_is_visible() {
        let gate = Gate::new("X", "#FF0000", square(Plot::B)).unwrap();
        assert!(gate.visible);
        assert_eq!(gate.plot(), Some(Plot::B));
        assert_eq!(gate.ring()[2], [10.0, 10.0]);
    }

    #[test]
    fn test_rejects_short_ring() {
        let mut vertices = square(Plot::A);
        vertices.truncate(2);
        assert!(matches!(
            Gate::new("X", "red", vertices),
            Err(CytogateError::DegenerateGate { found: 2 })
        ));
    }

    #[test]
    fn test_rejects_mixed_plots() {
        let mut vertices = square(Plot::A);
        vertices[1].plot = Plot::B;
        assert!(matches!(Gate::new("X", "red", vertices), Err(CytogateError::MixedPlotGate)));
    }

    #[test]
    fn test_serialized_field_names() {
        let gate = Gate::new("X", "red", square(Plot::A)).unwrap();
        let json = serde_json::to_value(&gate).unwrap();
        assert_eq!(json["points"][0], serde_json::json!({ "x": 0.0, "y": 0.0, "plot": "A" }));
        assert_eq!(json["name"], "X");
        assert_eq!(json["visible"], true);
    }
}
