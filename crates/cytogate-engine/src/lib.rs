//! Cytogate Engine - Gate drawing, dyeing, and the workbench
//!
//! This crate ties the point store, ring geometry, and session store together
//! into the single-user gating workflow.

pub mod classifier;
pub mod gate_session;
pub mod mode;
pub mod workbench;

pub use classifier::{dye, DyeReport};
pub use gate_session::{Click, GateSession, GateState, VertexOutcome};
pub use mode::UiMode;
pub use workbench::{ClickOutcome, LastClick, Workbench, WorkbenchOptions};
