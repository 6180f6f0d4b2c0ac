//! Measurement input formats
//!
//! Readers turn a tabular measurement file into unclassified [`Point`]s. Rows that
//! cannot supply all three measurements are dropped, not defaulted.

use serde::{Deserialize, Serialize};

use crate::models::Point;

pub mod delimited;

pub use delimited::{read_measurements, read_measurements_from};

/// Column names that feed the two plot projections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementColumns {
    /// X measurement of plot A
    pub a_x: String,
    /// X measurement of plot B
    pub b_x: String,
    /// Y measurement shared by both plots
    pub y: String,
}

impl Default for MeasurementColumns {
    fn default() -> Self {
        Self {
            a_x: "CD45-KrO".to_string(),
            b_x: "CD19-PB".to_string(),
            y: "SS INT LIN".to_string(),
        }
    }
}

/// Parsed measurement file
#[derive(Debug, Clone, Default)]
pub struct MeasurementSet {
    pub points: Vec<Point>,
    /// Rows dropped because a measurement was missing or not a finite number
    pub dropped_rows: usize,
}
