//! Tracks which points of interest the visitor has looked at.

use bevy_math::prelude::*;
use bevy_platform::collections::HashSet;
use bevy_reflect::prelude::*;

use super::PointOfInterest;

/// How close and how squarely the camera must face a point to count as a visit.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct VisitSettings {
    /// Largest horizontal distance from the point's center.
    pub distance: f32,
    /// Smallest cosine between the camera's flat forward vector and the direction to the point.
    pub min_facing: f32,
}

impl Default for VisitSettings {
    fn default() -> Self {
        Self {
            distance: 2.5,
            min_facing: 0.8,
        }
    }
}

impl VisitSettings {
    /// Is a camera at `position`, facing `forward`, visiting `point`? The camera must be on the
    /// side the point faces.
    pub fn is_visiting(&self, point: &PointOfInterest, position: Vec3, forward: Vec3) -> bool {
        let to_point = (point.center - position).with_y(0.0);
        if to_point.length() > self.distance {
            return false;
        }
        if (position - point.center).dot(point.normal) <= 0.0 {
            return false;
        }
        let Some(to_point) = to_point.try_normalize() else {
            return false;
        };
        forward.with_y(0.0).normalize_or_zero().dot(to_point) >= self.min_facing
    }
}

/// The indices of every point visited so far. Only grows, until a new set of points replaces the
/// old one.
#[derive(Debug, Clone, Default, Reflect)]
pub struct VisitedSet {
    #[reflect(ignore)]
    visited: HashSet<usize>,
    completed: bool,
}

impl VisitedSet {
    /// Forget all visits, for a new list of points.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.completed = false;
    }

    /// Has this point been visited?
    pub fn contains(&self, index: usize) -> bool {
        self.visited.contains(&index)
    }

    /// Number of points visited.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// Has nothing been visited yet?
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Record any points visited from this pose. Returns `true` only on the call where every
    /// point has been visited for the first time.
    pub fn observe(
        &mut self,
        settings: &VisitSettings,
        points: &[PointOfInterest],
        position: Vec3,
        forward: Vec3,
    ) -> bool {
        if self.completed {
            return false;
        }
        for (index, point) in points.iter().enumerate() {
            if settings.is_visiting(point, position, forward) {
                self.visited.insert(index);
            }
        }
        self.completed = !points.is_empty() && self.visited.len() == points.len();
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> Vec<PointOfInterest> {
        vec![
            PointOfInterest::new(Vec3::new(-4.0, 2.0, 0.0), Vec3::X),
            PointOfInterest::new(Vec3::new(4.0, 2.0, 0.0), Vec3::NEG_X),
        ]
    }

    #[test]
    fn visit_needs_proximity_facing_and_front_side() {
        let settings = VisitSettings::default();
        let point = &gallery()[0];
        let in_front = Vec3::new(-2.5, 1.6, 0.0);
        assert!(settings.is_visiting(point, in_front, Vec3::NEG_X));
        assert!(!settings.is_visiting(point, in_front, Vec3::X));
        assert!(!settings.is_visiting(point, Vec3::new(0.0, 1.6, 0.0), Vec3::NEG_X));
        assert!(!settings.is_visiting(point, Vec3::new(-5.0, 1.6, 0.0), Vec3::X));
    }

    #[test]
    fn completion_fires_once() {
        let settings = VisitSettings::default();
        let points = gallery();
        let mut visited = VisitedSet::default();
        assert!(!visited.observe(&settings, &points, Vec3::new(-2.5, 1.6, 0.0), Vec3::NEG_X));
        assert_eq!(visited.len(), 1);
        assert!(visited.observe(&settings, &points, Vec3::new(2.5, 1.6, 0.0), Vec3::X));
        assert!(!visited.observe(&settings, &points, Vec3::new(2.5, 1.6, 0.0), Vec3::X));
        assert!(!visited.observe(&settings, &points, Vec3::new(-2.5, 1.6, 0.0), Vec3::NEG_X));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn empty_list_never_completes() {
        let mut visited = VisitedSet::default();
        assert!(!visited.observe(&VisitSettings::default(), &[], Vec3::ZERO, Vec3::NEG_Z));
    }

    #[test]
    fn reset_allows_completion_again() {
        let settings = VisitSettings::default();
        let points = &gallery()[..1];
        let mut visited = VisitedSet::default();
        assert!(visited.observe(&settings, points, Vec3::new(-2.5, 1.6, 0.0), Vec3::NEG_X));
        visited.reset();
        assert!(visited.is_empty());
        assert!(visited.observe(&settings, points, Vec3::new(-2.5, 1.6, 0.0), Vec3::NEG_X));
    }
}
