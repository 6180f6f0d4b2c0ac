use cytogate_core::models::Coord;
use geo::algorithm::area::Area;
use geo::algorithm::centroid::Centroid;
use geo::{Distance, Euclidean};

use crate::models::{to_geo_point, to_geo_polygon};

/// Even-odd containment test against a ring, open or closed.
///
/// Casts a ray from `point` toward +X and counts the edges it crosses, where an
/// edge counts only if exactly one endpoint lies strictly above the point. A
/// point on a left-facing boundary is inside, on a right-facing boundary outside.
/// Rings with fewer than 3 vertices contain nothing.
pub fn point_in_polygon(point: Coord, ring: &[Coord]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let [px, py] = point;
    let mut inside = false;

    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];

        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Signed shoelace area, positive for counter-clockwise rings
pub fn area(ring: &[Coord]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    to_geo_polygon(ring).signed_area()
}

/// Area-weighted centroid, falling back to the vertex mean for flat rings
pub fn centroid(ring: &[Coord]) -> Option<Coord> {
    to_geo_polygon(ring).centroid().map(|p| [p.x(), p.y()])
}

/// Euclidean distance between two coordinates
pub fn distance(a: Coord, b: Coord) -> f64 {
    Euclidean.distance(to_geo_point(a), to_geo_point(b))
}
