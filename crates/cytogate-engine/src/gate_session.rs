//! Polygon drawing state machine.
//!
//! A gate is drawn by clicking vertices on one plot. Clicking near the first vertex
//! (in pixel space) closes the ring once it has at least three vertices, after which
//! the ring waits for a name and color before it joins the saved gates.

use cytogate_core::error::{CytogateError, Result};
use cytogate_core::models::{Coord, Gate, Plot, Vertex};
use cytogate_geo::distance;
use std::mem;

/// A click already translated into both pixel and data space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub plot: Plot,
    /// Frame-relative pixel position, used for closure snapping
    pub pixel: Coord,
    /// Data-space position, stored in the gate
    pub data: Coord,
}

/// State of the gate being drawn
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GateState {
    #[default]
    Idle,
    Drawing {
        vertices: Vec<Vertex>,
        /// Pixel position of the first vertex
        anchor: Option<Coord>,
    },
    /// Closed ring waiting for a name and color
    PendingSave { vertices: Vec<Vertex> },
}

impl GateState {
    pub fn label(&self) -> &'static str {
        match self {
            GateState::Idle => "idle",
            GateState::Drawing { .. } => "drawing a gate",
            GateState::PendingSave { .. } => "naming a gate",
        }
    }
}

/// What a click did to the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexOutcome {
    /// No gate is being drawn
    Ignored,
    /// Vertex appended; carries the new vertex count
    Appended(usize),
    /// Closing click with fewer than three vertices, swallowed
    Absorbed,
    /// Ring closed and waiting to be saved
    Closed,
    /// Click on the other plot discarded the gate
    Aborted,
}

#[derive(Debug, Clone)]
pub struct GateSession {
    state: GateState,
    closure_threshold: f64,
}

impl GateSession {
    pub fn new(closure_threshold: f64) -> Self {
        Self { state: GateState::Idle, closure_threshold }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GateState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GateState::Drawing { .. })
    }

    pub fn is_pending_save(&self) -> bool {
        matches!(self.state, GateState::PendingSave { .. })
    }

    /// Vertices of the in-progress gate, for rendering
    pub fn vertices(&self) -> &[Vertex] {
        match &self.state {
            GateState::Idle => &[],
            GateState::Drawing { vertices, .. } | GateState::PendingSave { vertices } => {
                vertices.as_slice()
            }
        }
    }

    /// Plot the in-progress gate is tied to, once it has a vertex
    pub fn plot(&self) -> Option<Plot> {
        self.vertices().first().map(|v| v.plot)
    }

    pub fn start_drawing(&mut self) -> Result<()> {
        if !self.is_idle() {
            return Err(self.invalid("start drawing"));
        }
        self.state = GateState::Drawing { vertices: Vec::new(), anchor: None };
        tracing::debug!("Started drawing a gate");
        Ok(())
    }

    pub fn add_vertex(&mut self, click: Click) -> VertexOutcome {
        let state = mem::take(&mut self.state);
        let GateState::Drawing { mut vertices, anchor } = state else {
            self.state = state;
            return VertexOutcome::Ignored;
        };

        let vertex = Vertex::new(click.data[0], click.data[1], click.plot);

        let (first, anchor) = match (vertices.first().copied(), anchor) {
            (Some(first), Some(anchor)) => (first, anchor),
            _ => {
                vertices.push(vertex);
                self.state = GateState::Drawing { vertices, anchor: Some(click.pixel) };
                return VertexOutcome::Appended(1);
            }
        };

        if first.plot != click.plot {
            tracing::debug!(
                gate_plot = %first.plot,
                clicked = %click.plot,
                "Discarding gate after click on the other plot"
            );
            return VertexOutcome::Aborted;
        }

        if distance(click.pixel, anchor) < self.closure_threshold {
            if vertices.len() < 3 {
                self.state = GateState::Drawing { vertices, anchor: Some(anchor) };
                return VertexOutcome::Absorbed;
            }
            vertices.push(first);
            tracing::debug!(vertices = vertices.len(), "Closed gate ring");
            self.state = GateState::PendingSave { vertices };
            return VertexOutcome::Closed;
        }

        vertices.push(vertex);
        let count = vertices.len();
        self.state = GateState::Drawing { vertices, anchor: Some(anchor) };
        VertexOutcome::Appended(count)
    }

    /// Discard the in-progress drawing
    pub fn cancel(&mut self) -> Result<()> {
        if !self.is_drawing() {
            return Err(self.invalid("cancel drawing"));
        }
        self.state = GateState::Idle;
        Ok(())
    }

    /// Name the closed ring and add it to `saved`.
    ///
    /// Blank or already used names leave everything untouched.
    pub fn confirm_save(&mut self, name: &str, color: &str, saved: &mut Vec<Gate>) -> Result<Gate> {
        let GateState::PendingSave { vertices } = &self.state else {
            return Err(self.invalid("save a gate"));
        };

        if name.trim().is_empty() {
            return Err(CytogateError::InvalidGateName {
                reason: "name must not be blank".to_string(),
            });
        }
        if saved.iter().any(|g| g.name == name) {
            return Err(CytogateError::DuplicateGateName { name: name.to_string() });
        }

        let gate = Gate::new(name, color, vertices.clone())?;
        saved.push(gate.clone());
        self.state = GateState::Idle;
        tracing::info!(gate = name, plot = ?gate.plot(), "Saved gate");
        Ok(gate)
    }

    /// Drop the closed ring without creating a gate
    pub fn cancel_save(&mut self) -> Result<()> {
        if !self.is_pending_save() {
            return Err(self.invalid("cancel saving a gate"));
        }
        self.state = GateState::Idle;
        Ok(())
    }

    /// Return to idle from any state
    pub fn reset(&mut self) {
        self.state = GateState::Idle;
    }

    fn invalid(&self, action: &str) -> CytogateError {
        CytogateError::InvalidTransition {
            action: action.to_string(),
            mode: self.state.label().to_string(),
        }
    }
}
