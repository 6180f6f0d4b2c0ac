//! Cytogate Geo - Ring geometry and plot scales
//!
//! This crate holds the pure geometry used by gating (containment, area, centroid,
//! distance) and the scales that translate between pixel and data space.

pub mod models;
pub mod ring;
pub mod scale;

pub use ring::{area, centroid, distance, point_in_polygon};
pub use scale::{LinearScale, Margin, PlotFrame, PlotLayout};
