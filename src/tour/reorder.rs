//! Wall grouping and the "snake" reordering applied before a tour starts.

use std::ops::Range;

use bevy_math::prelude::*;

use super::PointOfInterest;

/// Do two facing normals belong to the same wall? Both horizontal components must agree within
/// `tolerance`.
pub fn same_wall(a: Vec3, b: Vec3, tolerance: f32) -> bool {
    (a.x - b.x).abs() < tolerance && (a.z - b.z).abs() < tolerance
}

/// Split `points` into maximal runs of consecutive points on the same wall.
pub fn wall_groups(points: &[PointOfInterest], tolerance: f32) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut start = 0;
    for i in 1..=points.len() {
        let split = i == points.len()
            || !same_wall(points[i - 1].normal, points[i].normal, tolerance);
        if split {
            groups.push(start..i);
            start = i;
        }
    }
    groups
}

/// Reverse each wall group, after the first, whose last point is at least as close as its first
/// point to the end of the previous group. A group keeps its order only when its first point is
/// strictly closer.
///
/// Decisions are made in order, so a reversal is visible when choosing the next group.
pub fn snake_reorder(points: &mut [PointOfInterest], tolerance: f32) {
    let groups = wall_groups(points, tolerance);
    for pair in groups.windows(2) {
        let (previous, group) = (&pair[0], &pair[1]);
        let anchor = points[previous.end - 1].center;
        let to_first = planar_distance_squared(anchor, points[group.start].center);
        let to_last = planar_distance_squared(anchor, points[group.end - 1].center);
        if to_last <= to_first {
            points[group.clone()].reverse();
        }
    }
}

fn planar_distance_squared(a: Vec3, b: Vec3) -> f32 {
    let (dx, dz) = (a.x - b.x, a.z - b.z);
    dx * dx + dz * dz
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, x: f32, z: f32, normal: Vec3) -> PointOfInterest {
        PointOfInterest::new(Vec3::new(x, 0.0, z), normal).with_label(label)
    }

    fn labels(points: &[PointOfInterest]) -> Vec<&str> {
        points.iter().map(|p| p.label.as_str()).collect()
    }

    #[test]
    fn groups_split_on_normal_change() {
        let points = [
            point("a", -2.0, 5.0, Vec3::X),
            point("b", -2.0, 6.0, Vec3::new(1.0, 0.0, 0.05)),
            point("c", 2.0, 10.0, Vec3::NEG_X),
            point("d", -2.0, 2.0, Vec3::X),
        ];
        assert_eq!(wall_groups(&points, 0.1), vec![0..2, 2..3, 3..4]);
        assert!(wall_groups(&[], 0.1).is_empty());
    }

    #[test]
    fn reverses_group_when_its_end_is_closer() {
        let mut points = [
            point("A", -2.0, 5.0, Vec3::X),
            point("B", -2.0, 6.0, Vec3::X),
            point("C", 2.0, 10.0, Vec3::NEG_X),
            point("D", 2.0, 2.0, Vec3::NEG_X),
        ];
        snake_reorder(&mut points, 0.1);
        assert_eq!(labels(&points), ["A", "B", "D", "C"]);
    }

    #[test]
    fn keeps_group_when_its_start_is_closer() {
        let mut points = [
            point("A", -2.0, 5.0, Vec3::X),
            point("B", -2.0, 9.0, Vec3::X),
            point("C", 2.0, 10.0, Vec3::NEG_X),
            point("D", 2.0, 2.0, Vec3::NEG_X),
        ];
        snake_reorder(&mut points, 0.1);
        assert_eq!(labels(&points), ["A", "B", "C", "D"]);
    }

    #[test]
    fn ties_reverse_group() {
        let mut points = [
            point("A", 0.0, 0.0, Vec3::X),
            point("B", 1.0, 1.0, Vec3::Z),
            point("C", -1.0, 1.0, Vec3::Z),
        ];
        snake_reorder(&mut points, 0.1);
        assert_eq!(labels(&points), ["A", "C", "B"]);
    }

    #[test]
    fn reversal_feeds_the_next_decision() {
        let mut points = [
            point("A", 0.0, 0.0, Vec3::Z),
            point("B", 10.0, 9.0, Vec3::X),
            point("C", 1.0, 1.0, Vec3::X),
            // After reversal the previous group ends at B, so E is closer than F.
            point("E", 10.0, 20.0, Vec3::NEG_Z),
            point("F", 0.0, 20.0, Vec3::NEG_Z),
        ];
        snake_reorder(&mut points, 0.1);
        assert_eq!(labels(&points), ["A", "C", "B", "E", "F"]);
    }
}
