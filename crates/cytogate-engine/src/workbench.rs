//! The gating workbench: one user's points, gates, groups and dialogs.

use std::thread;
use std::time::{Duration, Instant};

use cytogate_core::config::LayeredConfig;
use cytogate_core::error::{CytogateError, Result};
use cytogate_core::models::{
    Coord, Gate, GroupVisibility, Plot, Point, ScratchEntry, SessionMeta, SessionSnapshot,
};
use cytogate_core::ports::SessionStore;
use cytogate_core::{GroupSummary, PointStore};
use cytogate_geo::PlotLayout;
use serde::Serialize;

use crate::classifier::{dye_saved_gate, DyeReport};
use crate::gate_session::{Click, GateSession, VertexOutcome};
use crate::mode::UiMode;

/// Tunables for a workbench
#[derive(Debug, Clone)]
pub struct WorkbenchOptions {
    /// Pixel distance to the first vertex that closes a ring
    pub closure_threshold: f64,
    pub dye_delay: Duration,
    pub default_color: String,
    pub layout: PlotLayout,
}

impl Default for WorkbenchOptions {
    fn default() -> Self {
        Self {
            closure_threshold: 20.0,
            dye_delay: Duration::from_millis(1000),
            default_color: "gray".to_string(),
            layout: PlotLayout::default(),
        }
    }
}

impl WorkbenchOptions {
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            closure_threshold: config.closure_threshold.value,
            dye_delay: config.dye_delay(),
            default_color: config.default_color.value.clone(),
            layout: PlotLayout::default(),
        }
    }
}

/// Readout of the most recent in-bounds click
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LastClick {
    pub plot: Plot,
    pub data: Coord,
}

/// What a click on a plot did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Outside the drawable area; nothing changed
    OutOfBounds,
    /// A dialog is open
    Blocked,
    /// Only the last-clicked readout was updated
    Recorded,
    /// Forwarded to the gate being drawn
    Vertex(VertexOutcome),
}

pub struct Workbench {
    points: PointStore,
    gates: Vec<Gate>,
    visibility: GroupVisibility,
    session: GateSession,
    mode: UiMode,
    last_click: Option<LastClick>,
    options: WorkbenchOptions,
    store: Box<dyn SessionStore>,
}

impl Workbench {
    pub fn new(points: Vec<Point>, store: Box<dyn SessionStore>, options: WorkbenchOptions) -> Self {
        Self {
            points: PointStore::new(points),
            gates: Vec::new(),
            visibility: GroupVisibility::new(),
            session: GateSession::new(options.closure_threshold),
            mode: UiMode::Browsing,
            last_click: None,
            options,
            store,
        }
    }

    pub fn points(&self) -> &[Point] {
        self.points.points()
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn gate(&self, name: &str) -> Option<&Gate> {
        self.gates.iter().find(|g| g.name == name)
    }

    pub fn visibility(&self) -> &GroupVisibility {
        &self.visibility
    }

    pub fn session(&self) -> &GateSession {
        &self.session
    }

    pub fn mode(&self) -> &UiMode {
        &self.mode
    }

    pub fn last_click(&self) -> Option<LastClick> {
        self.last_click
    }

    pub fn options(&self) -> &WorkbenchOptions {
        &self.options
    }

    pub fn layout(&self) -> &PlotLayout {
        &self.options.layout
    }

    // Gate drawing

    pub fn start_drawing(&mut self) -> Result<()> {
        self.ensure_no_dialog("start drawing")?;
        self.session.start_drawing()
    }

    /// Handle a click at a frame-relative pixel position on `plot`
    pub fn click(&mut self, plot: Plot, pixel: Coord) -> ClickOutcome {
        if matches!(self.mode, UiMode::SavingSession | UiMode::LoadingSession) {
            return ClickOutcome::Blocked;
        }
        let Some(data) = self.options.layout.to_data(plot, pixel) else {
            return ClickOutcome::OutOfBounds;
        };

        self.last_click = Some(LastClick { plot, data });

        if !self.session.is_drawing() {
            return ClickOutcome::Recorded;
        }
        ClickOutcome::Vertex(self.session.add_vertex(Click { plot, pixel, data }))
    }

    pub fn cancel_drawing(&mut self) -> Result<()> {
        self.session.cancel()
    }

    /// Name the closed ring, add it to the saved gates and the scratch log
    pub fn confirm_gate(&mut self, name: &str, color: &str) -> Result<Gate> {
        let gate = self.session.confirm_save(name, color, &mut self.gates)?;

        // The gate is already saved in memory; the scratch log is best effort
        if let Err(e) = self.store.append_scratch(&gate) {
            tracing::warn!(gate = %gate.name, error = %e, "Failed to append gate to scratch log");
        }
        Ok(gate)
    }

    pub fn cancel_gate(&mut self) -> Result<()> {
        self.session.cancel_save()
    }

    // Saved gates

    pub fn set_gate_color(&mut self, name: &str, color: &str) -> Result<()> {
        self.ensure_idle("recolor a gate")?;
        self.gate_mut(name)?.color = color.to_string();
        Ok(())
    }

    pub fn set_gate_visible(&mut self, name: &str, visible: bool) -> Result<()> {
        self.gate_mut(name)?.visible = visible;
        Ok(())
    }

    /// Flip a saved gate's visibility, returning the new value
    pub fn toggle_gate_visibility(&mut self, name: &str) -> Result<bool> {
        let gate = self.gate_mut(name)?;
        gate.visible = !gate.visible;
        Ok(gate.visible)
    }

    pub fn remove_gate(&mut self, name: &str) -> Result<Gate> {
        self.ensure_idle("remove a gate")?;
        let index = self
            .gates
            .iter()
            .position(|g| g.name == name)
            .ok_or_else(|| CytogateError::GateNotFound { name: name.to_string() })?;
        Ok(self.gates.remove(index))
    }

    // Dyeing

    /// Enter the busy period for dyeing with gate `name`
    pub fn begin_dye(&mut self, name: &str, now: Instant) -> Result<Instant> {
        self.ensure_idle("dye")?;
        if self.gate(name).is_none() {
            return Err(CytogateError::GateNotFound { name: name.to_string() });
        }

        let ready_at = now + self.options.dye_delay;
        self.mode = UiMode::Dyeing { gate: name.to_string(), ready_at };
        tracing::debug!(gate = name, delay_ms = self.options.dye_delay.as_millis() as u64, "Dyeing");
        Ok(ready_at)
    }

    /// Apply a pending dye once its busy period has elapsed
    pub fn poll_dye(&mut self, now: Instant) -> Result<Option<DyeReport>> {
        let UiMode::Dyeing { gate, ready_at } = &self.mode else {
            return Ok(None);
        };
        if now < *ready_at {
            return Ok(None);
        }

        let gate = gate.clone();
        self.mode = UiMode::Browsing;
        dye_saved_gate(&gate, &mut self.points, &mut self.gates, &mut self.visibility).map(Some)
    }

    /// Dye with gate `name`, sleeping through the busy period
    pub fn dye_blocking(&mut self, name: &str) -> Result<DyeReport> {
        let ready_at = self.begin_dye(name, Instant::now())?;
        thread::sleep(self.options.dye_delay);

        self.poll_dye(ready_at)?.ok_or_else(|| CytogateError::InvalidTransition {
            action: "finish dyeing".to_string(),
            mode: self.mode.label().to_string(),
        })
    }

    // Groups

    /// Flip a dyed group's visibility, returning the new value
    pub fn toggle_group(&mut self, name: &str) -> Result<bool> {
        let known = self.visibility.contains_key(name)
            || self.points.points().iter().any(|p| p.group.as_deref() == Some(name));
        if !known {
            return Err(CytogateError::GroupNotFound { name: name.to_string() });
        }

        let flag = self.visibility.entry(name.to_string()).or_insert(true);
        *flag = !*flag;
        tracing::debug!(group = name, visible = *flag, "Toggled group");
        Ok(*flag)
    }

    pub fn groups(&self) -> Vec<GroupSummary> {
        self.points.groups(&self.visibility)
    }

    /// Color a renderer should draw `point` with
    pub fn display_color<'a>(&'a self, point: &'a Point) -> &'a str {
        PointStore::display_color(point, &self.visibility, &self.options.default_color)
    }

    // Sessions

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            points: self.points.points().to_vec(),
            gates: self.gates.clone(),
            group_visibility: self.visibility.clone(),
        }
    }

    pub fn save_session(&mut self, name: &str) -> Result<()> {
        self.ensure_not_busy()?;
        let name = session_name(name)?;

        self.store
            .save_session(name, &self.snapshot())
            .inspect_err(|e| tracing::error!(session = name, error = %e, "Failed to save session"))?;

        self.close_dialog();
        tracing::info!(session = name, points = self.points.len(), gates = self.gates.len(), "Saved session");
        Ok(())
    }

    /// Replace the whole workbench state with a saved session
    pub fn load_session(&mut self, name: &str) -> Result<()> {
        self.ensure_not_busy()?;
        let name = session_name(name)?;

        let snapshot = self
            .store
            .load_session(name)
            .inspect_err(|e| tracing::error!(session = name, error = %e, "Failed to load session"))?
            .ok_or_else(|| CytogateError::SessionNotFound { name: name.to_string() })?;
        snapshot.validate()?;

        self.points = PointStore::new(snapshot.points);
        self.gates = snapshot.gates;
        self.visibility = snapshot.group_visibility;
        self.session.reset();
        self.last_click = None;
        self.close_dialog();

        tracing::info!(session = name, points = self.points.len(), gates = self.gates.len(), "Loaded session");
        Ok(())
    }

    pub fn delete_session(&mut self, name: &str) -> Result<bool> {
        let removed = self
            .store
            .delete_session(name)
            .inspect_err(|e| tracing::error!(session = name, error = %e, "Failed to delete session"))?;
        if removed {
            tracing::info!(session = name, "Deleted session");
        }
        Ok(removed)
    }

    pub fn list_sessions(&self) -> Result<Vec<SessionMeta>> {
        self.store
            .list_sessions()
            .inspect_err(|e| tracing::error!(error = %e, "Failed to list sessions"))
    }

    pub fn scratch_entries(&self) -> Result<Vec<ScratchEntry>> {
        self.store
            .scratch_entries()
            .inspect_err(|e| tracing::error!(error = %e, "Failed to read scratch log"))
    }

    /// Restore the loaded points and discard gates and groups; the store is untouched
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_not_busy()?;
        self.points.reset();
        self.gates.clear();
        self.visibility.clear();
        self.session.reset();
        self.last_click = None;
        tracing::info!(points = self.points.len(), "Reset to original data");
        Ok(())
    }

    // Dialogs

    pub fn open_save_dialog(&mut self) -> Result<()> {
        self.ensure_idle("open the save dialog")?;
        self.mode = UiMode::SavingSession;
        Ok(())
    }

    pub fn open_load_dialog(&mut self) -> Result<()> {
        self.ensure_idle("open the load dialog")?;
        self.mode = UiMode::LoadingSession;
        Ok(())
    }

    /// Close an open dialog; dyeing is not interrupted
    pub fn close_dialog(&mut self) {
        if matches!(self.mode, UiMode::SavingSession | UiMode::LoadingSession) {
            self.mode = UiMode::Browsing;
        }
    }

    fn gate_mut(&mut self, name: &str) -> Result<&mut Gate> {
        self.gates
            .iter_mut()
            .find(|g| g.name == name)
            .ok_or_else(|| CytogateError::GateNotFound { name: name.to_string() })
    }

    fn ensure_not_busy(&self) -> Result<()> {
        match self.mode.remaining(Instant::now()) {
            Some(remaining) => Err(CytogateError::Busy { remaining_ms: remaining.as_millis() as u64 }),
            None => Ok(()),
        }
    }

    fn ensure_no_dialog(&self, action: &str) -> Result<()> {
        if matches!(self.mode, UiMode::SavingSession | UiMode::LoadingSession) {
            return Err(CytogateError::InvalidTransition {
                action: action.to_string(),
                mode: self.mode.label().to_string(),
            });
        }
        Ok(())
    }

    /// Browsing with no gate waiting for a name
    fn ensure_idle(&self, action: &str) -> Result<()> {
        self.ensure_not_busy()?;
        self.ensure_no_dialog(action)?;
        if self.session.is_pending_save() {
            return Err(CytogateError::InvalidTransition {
                action: action.to_string(),
                mode: self.session.state().label().to_string(),
            });
        }
        Ok(())
    }
}

fn session_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CytogateError::InvalidSessionName {
            reason: "name must not be blank".to_string(),
        });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cytogate_store::MemorySessionStore;

    fn options() -> WorkbenchOptions {
        WorkbenchOptions { dye_delay: Duration::ZERO, ..Default::default() }
    }

    fn workbench() -> Workbench {
        let points = vec![
            Point::new([500.0, 500.0], [500.0, 500.0]),
            Point::new([900.0, 900.0], [900.0, 900.0]),
        ];
        Workbench::new(points, Box::new(MemorySessionStore::new()), options())
    }

    /// Draw a triangle on plot A around data (500, 500) and confirm it
    fn draw_gate(bench: &mut Workbench, name: &str) -> Gate {
        let layout = *bench.layout();
        bench.start_drawing().unwrap();
        for data in [[400.0, 400.0], [700.0, 400.0], [500.0, 700.0]] {
            bench.click(Plot::A, layout.to_pixel(Plot::A, data));
        }
        let first = layout.to_pixel(Plot::A, [400.0, 400.0]);
        let outcome = bench.click(Plot::A, [first[0] + 2.0, first[1] - 2.0]);
        assert_eq!(outcome, ClickOutcome::Vertex(VertexOutcome::Closed));
        bench.confirm_gate(name, "#FF0000").unwrap()
    }

    #[test]
    fn test_click_outside_frame_is_noop() {
        let mut bench = workbench();
        bench.start_drawing().unwrap();

        assert_eq!(bench.click(Plot::A, [5.0, 5.0]), ClickOutcome::OutOfBounds);
        assert_eq!(bench.last_click(), None);
        assert!(bench.session().vertices().is_empty());
    }

    #[test]
    fn test_click_without_drawing_updates_readout() {
        let mut bench = workbench();
        let pixel = bench.layout().to_pixel(Plot::B, [250.0, 750.0]);

        assert_eq!(bench.click(Plot::B, pixel), ClickOutcome::Recorded);

        let last = bench.last_click().unwrap();
        assert_eq!(last.plot, Plot::B);
        assert!((last.data[0] - 250.0).abs() < 1e-9);
        assert!((last.data[1] - 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_confirmed_gate_goes_to_scratch_log() {
        let mut bench = workbench();
        let gate = draw_gate(&mut bench, "X");

        assert_eq!(bench.gates(), &[gate.clone()]);
        let scratch = bench.scratch_entries().unwrap();
        assert_eq!(scratch.len(), 1);
        assert_eq!(scratch[0].gate, gate);
    }

    #[test]
    fn test_dye_consumes_gate_and_shows_group() {
        let mut bench = workbench();
        draw_gate(&mut bench, "X");

        let report = bench.dye_blocking("X").unwrap();

        assert_eq!(report.matched, 1);
        assert!(bench.gates().is_empty());
        assert_eq!(bench.visibility().get("X"), Some(&true));
        assert_eq!(bench.points()[0].group.as_deref(), Some("X"));
        assert!(!bench.points()[1].is_classified());
        assert_eq!(bench.mode(), &UiMode::Browsing);
    }

    #[test]
    fn test_dye_cannot_be_retriggered_while_busy() {
        let mut bench = Workbench::new(
            vec![Point::new([500.0, 500.0], [500.0, 500.0])],
            Box::new(MemorySessionStore::new()),
            WorkbenchOptions { dye_delay: Duration::from_secs(60), ..Default::default() },
        );
        draw_gate(&mut bench, "X");
        draw_gate(&mut bench, "Y");

        let now = Instant::now();
        let ready_at = bench.begin_dye("X", now).unwrap();

        assert!(matches!(bench.begin_dye("Y", now), Err(CytogateError::Busy { .. })));
        assert!(matches!(bench.open_save_dialog(), Err(CytogateError::Busy { .. })));
        assert_eq!(bench.poll_dye(now).unwrap(), None);
        assert!(!bench.points()[0].is_classified());

        let report = bench.poll_dye(ready_at).unwrap().unwrap();
        assert_eq!(report.gate, "X");
        assert_eq!(bench.gates().len(), 1);
        assert!(bench.begin_dye("Y", ready_at).is_ok());
    }

    #[test]
    fn test_dye_unknown_gate() {
        let mut bench = workbench();
        let err = bench.begin_dye("missing", Instant::now()).unwrap_err();
        assert!(matches!(err, CytogateError::GateNotFound { .. }));
        assert_eq!(bench.mode(), &UiMode::Browsing);
    }

    #[test]
    fn test_toggle_group_is_involution() {
        let mut bench = workbench();
        draw_gate(&mut bench, "X");
        bench.dye_blocking("X").unwrap();
        let point = bench.points()[0].clone();

        assert!(!bench.toggle_group("X").unwrap());
        assert_eq!(bench.display_color(&point), "gray");
        assert!(bench.toggle_group("X").unwrap());
        assert_eq!(bench.display_color(&point), "#FF0000");

        assert!(matches!(bench.toggle_group("nope"), Err(CytogateError::GroupNotFound { .. })));
    }

    #[test]
    fn test_gate_edits() {
        let mut bench = workbench();
        draw_gate(&mut bench, "X");

        bench.set_gate_color("X", "blue").unwrap();
        assert!(!bench.toggle_gate_visibility("X").unwrap());
        assert_eq!(bench.gate("X").unwrap().color, "blue");

        let removed = bench.remove_gate("X").unwrap();
        assert!(!removed.visible);
        assert!(bench.gates().is_empty());
        assert!(bench.remove_gate("X").is_err());
    }

    #[test]
    fn test_dialogs_are_exclusive() {
        let mut bench = workbench();
        bench.open_save_dialog().unwrap();

        assert!(bench.open_load_dialog().is_err());
        assert!(bench.start_drawing().is_err());
        assert_eq!(bench.click(Plot::A, [200.0, 200.0]), ClickOutcome::Blocked);

        bench.close_dialog();
        bench.open_load_dialog().unwrap();
        assert_eq!(bench.mode(), &UiMode::LoadingSession);
    }

    #[test]
    fn test_save_closes_dialog() {
        let mut bench = workbench();
        bench.open_save_dialog().unwrap();
        bench.save_session("lab").unwrap();

        assert_eq!(bench.mode(), &UiMode::Browsing);
        assert_eq!(bench.list_sessions().unwrap()[0].name, "lab");
        assert!(matches!(bench.save_session("  "), Err(CytogateError::InvalidSessionName { .. })));
    }

    #[test]
    fn test_load_missing_session_keeps_state() {
        let mut bench = workbench();
        draw_gate(&mut bench, "X");

        let err = bench.load_session("missing").unwrap_err();
        assert!(matches!(err, CytogateError::SessionNotFound { .. }));
        assert_eq!(bench.gates().len(), 1);
    }

    #[test]
    fn test_reset_discards_gates_and_groups() {
        let mut bench = workbench();
        draw_gate(&mut bench, "X");
        bench.dye_blocking("X").unwrap();
        draw_gate(&mut bench, "Y");
        bench.save_session("kept").unwrap();

        bench.reset().unwrap();

        assert!(bench.gates().is_empty());
        assert!(bench.visibility().is_empty());
        assert!(bench.groups().is_empty());
        assert!(bench.points().iter().all(|p| !p.is_classified()));
        assert_eq!(bench.list_sessions().unwrap().len(), 1);
    }
}
