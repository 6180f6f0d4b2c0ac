//! Cytogate Core - Domain models, point store, and configuration
//!
//! This crate contains the core data model and port definitions for the Cytogate
//! gating engine.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod point_store;
pub mod ports;

pub use error::{CytogateError, Result};
pub use point_store::{GroupSummary, PointStore};
