//! Conversions between gate rings and `geo` crate types.

use cytogate_core::models::{Coord, Gate};

/// Convert a coordinate to a geo::Point
pub fn to_geo_point(coord: Coord) -> geo::Point {
    geo::Point::new(coord[0], coord[1])
}

/// Convert a ring to a geo::Polygon without holes; geo closes open rings
pub fn to_geo_polygon(ring: &[Coord]) -> geo::Polygon {
    let coords: Vec<geo::Coord> = ring.iter().map(|c| geo::Coord { x: c[0], y: c[1] }).collect();
    geo::Polygon::new(geo::LineString::new(coords), vec![])
}

/// Extension trait for Gate with display geometry
pub trait GateGeometryExt {
    /// Label anchor for the gate
    fn centroid_coords(&self) -> Option<Coord>;

    /// Signed area in data units
    fn signed_area(&self) -> f64;

    /// Whether a data-space coordinate on the gate's plot falls inside it
    fn contains(&self, coord: Coord) -> bool;
}

impl GateGeometryExt for Gate {
    fn centroid_coords(&self) -> Option<Coord> {
        crate::ring::centroid(&self.ring())
    }

    fn signed_area(&self) -> f64 {
        crate::ring::area(&self.ring())
    }

    fn contains(&self, coord: Coord) -> bool {
        crate::ring::point_in_polygon(coord, &self.ring())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cytogate_core::models::{Plot, Vertex};

    fn triangle() -> Gate {
        Gate::new(
            "T",
            "green",
            vec![
                Vertex::new(0.0, 0.0, Plot::A),
                Vertex::new(6.0, 0.0, Plot::A),
                Vertex::new(0.0, 6.0, Plot::A),
                Vertex::new(0.0, 0.0, Plot::A),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_polygon_is_closed() {
        let polygon = to_geo_polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
        assert_eq!(polygon.exterior().0.len(), 4);
    }

    #[test]
    fn test_gate_geometry() {
        let gate = triangle();
        assert!((gate.signed_area() - 18.0).abs() < 1e-10);

        let c = gate.centroid_coords().unwrap();
        assert!((c[0] - 2.0).abs() < 1e-10);
        assert!((c[1] - 2.0).abs() < 1e-10);

        assert!(gate.contains([1.0, 1.0]));
        assert!(!gate.contains([5.0, 5.0]));
    }
}
