//! In-memory holder for the loaded measurement set and its classification.

use serde::Serialize;

use crate::error::{CytogateError, Result};
use crate::models::{GroupVisibility, Point};

/// Summary of one derived group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    /// Color of the first member point
    pub color: Option<String>,
    pub count: usize,
    pub visible: bool,
}

/// Loaded points plus the pristine copy used by reset
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    original: Vec<Point>,
    points: Vec<Point>,
}

impl PointStore {
    /// Load a measurement set; the unclassified form becomes the reset target
    pub fn new(points: Vec<Point>) -> Self {
        let original = points.iter().map(Point::unclassified).collect();
        Self { original, points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn original(&self) -> &[Point] {
        &self.original
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replace the classified points with a same-sized set from the classifier
    pub fn apply(&mut self, points: Vec<Point>) -> Result<()> {
        if points.len() != self.points.len() {
            return Err(CytogateError::PointCountMismatch {
                expected: self.points.len(),
                found: points.len(),
            });
        }
        self.points = points;
        Ok(())
    }

    /// Restore the original load, dropping every classification
    pub fn reset(&mut self) {
        self.points = self.original.clone();
    }

    /// Derive groups from point assignments in first-seen order
    pub fn groups(&self, visibility: &GroupVisibility) -> Vec<GroupSummary> {
        let mut groups: Vec<GroupSummary> = Vec::new();
        for point in &self.points {
            let Some(ref name) = point.group else {
                continue;
            };
            match groups.iter_mut().find(|g| &g.name == name) {
                Some(group) => group.count += 1,
                None => groups.push(GroupSummary {
                    name: name.clone(),
                    color: point.color.clone(),
                    count: 1,
                    visible: is_visible(visibility, name),
                }),
            }
        }
        groups
    }

    /// Color a renderer should use for the point
    pub fn display_color<'a>(
        point: &'a Point,
        visibility: &GroupVisibility,
        default_color: &'a str,
    ) -> &'a str {
        match (&point.group, &point.color) {
            (Some(group), Some(color)) if is_visible(visibility, group) => color,
            _ => default_color,
        }
    }
}

/// Groups without an explicit flag are shown
fn is_visible(visibility: &GroupVisibility, group: &str) -> bool {
    visibility.get(group).copied().unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn store() -> PointStore {
        let mut points = vec![
            Point::new([1.0, 1.0], [1.0, 1.0]),
            Point::new([2.0, 2.0], [2.0, 2.0]),
            Point::new([3.0, 3.0], [3.0, 3.0]),
        ];
        points[0].classify("lymph", "red");
        points[2].classify("lymph", "red");
        PointStore::new(points)
    }

    #[test]
    fn test_original_is_unclassified() {
        let store = store();
        assert!(store.original().iter().all(|p| !p.is_classified()));
        assert!(store.points()[0].is_classified());
    }

    #[test]
    fn test_reset_restores_original() {
        let mut store = store();
        store.reset();
        assert_eq!(store.points(), store.original());
    }

    #[test]
    fn test_apply_rejects_size_change() {
        let mut store = store();
        let err = store.apply(vec![]).unwrap_err();
        assert!(matches!(err, CytogateError::PointCountMismatch { expected: 3, found: 0 }));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_groups_counts_members() {
        let store = store();
        let groups = store.groups(&GroupVisibility::new());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "lymph");
        assert_eq!(groups[0].count, 2);
        assert!(groups[0].visible);
    }

    #[test]
    fn test_hidden_group_uses_default_color() {
        let store = store();
        let mut visibility = GroupVisibility::new();
        let point = &store.points()[0];

        assert_eq!(PointStore::display_color(point, &visibility, "gray"), "red");

        visibility.insert("lymph".to_string(), false);
        assert_eq!(PointStore::display_color(point, &visibility, "gray"), "gray");
        assert_eq!(point.color.as_deref(), Some("red"));
    }

    fn arb_point() -> impl Strategy<Value = Point> {
        (0.0..1000.0f64, 0.0..1000.0f64, 0.0..1000.0f64, proptest::option::of("[a-z]{1,6}")).prop_map(
            |(a, b, y, group)| {
                let mut point = Point::new([a, y], [b, y]);
                if let Some(group) = group {
                    point.classify(group, "red");
                }
                point
            },
        )
    }

    proptest! {
        #[test]
        fn prop_reset_undoes_any_apply(
            points in proptest::collection::vec(arb_point(), 0..20),
            groups in proptest::collection::vec("[a-z]{1,6}", 20),
        ) {
            let mut store = PointStore::new(points.clone());
            let dyed: Vec<Point> = points
                .iter()
                .zip(&groups)
                .map(|(p, g)| {
                    let mut p = p.clone();
                    p.classify(g.as_str(), "blue");
                    p
                })
                .collect();

            store.apply(dyed).unwrap();
            prop_assert!(store.points().iter().all(Point::is_classified));

            store.reset();
            prop_assert_eq!(store.points(), store.original());
            prop_assert_eq!(store.len(), points.len());
            prop_assert!(store.points().iter().all(|p| !p.is_classified()));
        }

        #[test]
        fn prop_group_counts_cover_classified_points(points in proptest::collection::vec(arb_point(), 0..30)) {
            let store = PointStore::new(points);
            let classified = store.points().iter().filter(|p| p.is_classified()).count();
            let counted: usize = store.groups(&GroupVisibility::new()).iter().map(|g| g.count).sum();
            prop_assert_eq!(counted, classified);
        }
    }
}
