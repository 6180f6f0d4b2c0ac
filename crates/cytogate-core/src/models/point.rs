use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CytogateError;

/// Coordinate pair `[x, y]`
pub type Coord = [f64; 2];

/// One of the two scatter plots a point is projected onto.
///
/// Both plots share the Y measurement but use different X measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Plot {
    A,
    B,
}

impl Plot {
    pub fn label(&self) -> &'static str {
        match self {
            Plot::A => "A",
            Plot::B => "B",
        }
    }
}

impl fmt::Display for Plot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Plot {
    type Err = CytogateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Plot::A),
            "B" => Ok(Plot::B),
            _ => Err(CytogateError::InvalidPlot { value: s.to_string() }),
        }
    }
}

/// A single measured event with its two plot projections and classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Projection onto plot A
    #[serde(rename = "a")]
    pub coord_a: Coord,

    /// Projection onto plot B
    #[serde(rename = "b")]
    pub coord_b: Coord,

    /// Color copied from the gate that dyed this point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Name of the gate that dyed this point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Point {
    /// Create an unclassified point
    pub fn new(coord_a: Coord, coord_b: Coord) -> Self {
        Self { coord_a, coord_b, color: None, group: None }
    }

    /// Projection of this point onto the given plot
    pub fn coord(&self, plot: Plot) -> Coord {
        match plot {
            Plot::A => self.coord_a,
            Plot::B => self.coord_b,
        }
    }

    /// Assign this point to a group, replacing any earlier assignment
    pub fn classify(&mut self, group: impl Into<String>, color: impl Into<String>) {
        self.group = Some(group.into());
        self.color = Some(color.into());
    }

    /// Drop the classification, keeping the coordinates
    pub fn unclassified(&self) -> Self {
        Self::new(self.coord_a, self.coord_b)
    }

    pub fn is_classified(&self) -> bool {
        self.group.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_projection() {
        let point = Point::new([300.0, 120.0], [40.0, 120.0]);
        assert_eq!(point.coord(Plot::A), [300.0, 120.0]);
        assert_eq!(point.coord(Plot::B), [40.0, 120.0]);
    }

    #[test]
    fn test_classify_overwrites() {
        let mut point = Point::new([0.0, 0.0], [0.0, 0.0]);
        point.classify("first", "red");
        point.classify("second", "blue");
        assert_eq!(point.group.as_deref(), Some("second"));
        assert_eq!(point.color.as_deref(), Some("blue"));
        assert!(!point.unclassified().is_classified());
    }

    #[test]
    fn test_plot_parse() {
        assert_eq!("a".parse::<Plot>().unwrap(), Plot::A);
        assert_eq!(" B ".parse::<Plot>().unwrap(), Plot::B);
        assert!("C".parse::<Plot>().is_err());
    }

    #[test]
    fn test_unclassified_point_serializes_without_optional_fields() {
        let point = Point::new([1.0, 2.0], [3.0, 2.0]);
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json, serde_json::json!({ "a": [1.0, 2.0], "b": [3.0, 2.0] }));
    }
}
