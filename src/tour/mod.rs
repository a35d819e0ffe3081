//! The guided tour: visits every point of interest in a travel-efficient order, pausing in front
//! of each one.
//!
//! The [`TourSequencer`] owns no motion of its own. It hands [`NavigationTarget`]s to the
//! camera's navigator and advances when told a transit arrived, or when its pause deadline
//! passes.

pub mod reorder;
pub mod visited;

use std::time::Duration;

use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

use crate::controller::navigator::NavigationTarget;

/// A wall-mounted feature the tour visits.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct PointOfInterest {
    /// World space center.
    pub center: Vec3,
    /// Horizontal unit vector pointing out of the wall, toward the viewer.
    pub normal: Vec3,
    /// Width and height.
    pub extent: Vec2,
    /// Display name.
    pub label: String,
}

impl PointOfInterest {
    /// A point at `center` facing along `normal`. The normal is flattened and normalized; a
    /// vertical normal falls back to +Z.
    pub fn new(center: Vec3, normal: Vec3) -> Self {
        let normal = normal.with_y(0.0).try_normalize().unwrap_or_else(|| {
            warn!("Point of interest at {center} has no horizontal normal, facing +Z");
            Vec3::Z
        });
        Self {
            center,
            normal,
            extent: Vec2::ONE,
            label: String::new(),
        }
    }

    /// Set the width and height.
    pub fn with_extent(self, extent: Vec2) -> Self {
        Self { extent, ..self }
    }

    /// Set the display name.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..self
        }
    }
}

/// Distances and timings used by the tour.
#[derive(Debug, Clone, Reflect)]
pub struct TourSettings {
    /// Distance in front of a point for the close-up view.
    pub approach_distance: f32,
    /// Distance in front of a point for the full view.
    pub stepback_distance: f32,
    /// How long to linger at the full view before moving on.
    pub pause: Duration,
    /// The X coordinate of the room's center line, used as a waypoint when changing walls.
    pub room_center_x: f32,
    /// How closely two normals must agree to be on the same wall.
    pub wall_tolerance: f32,
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            approach_distance: 1.5,
            stepback_distance: 3.5,
            pause: Duration::from_millis(3000),
            room_center_x: 0.0,
            wall_tolerance: 0.1,
        }
    }
}

/// What the tour is doing at the current stop.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum TourPhase {
    /// Moving to the close-up view.
    Approach,
    /// Backing up to the full view.
    Stepback,
    /// Lingering at the full view.
    Pause {
        /// When to move on, as time since startup.
        until: Duration,
    },
    /// Crossing the room toward a different wall.
    CenterTransit,
}

/// How a tour ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TourOutcome {
    /// Every stop was visited.
    Completed,
    /// The tour was interrupted.
    Aborted,
}

/// What the sequencer wants done after an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TourStep {
    /// Nothing new.
    Wait,
    /// Start a transit.
    Transit(NavigationTarget),
    /// The tour just finished.
    Finished,
}

#[derive(Debug, Clone, Reflect)]
struct Tour {
    stops: Vec<PointOfInterest>,
    index: usize,
    phase: TourPhase,
}

/// Drives a camera through a list of points of interest.
#[derive(Debug, Clone, Default, Reflect)]
pub struct TourSequencer {
    tour: Option<Tour>,
}

impl TourSequencer {
    /// Is a tour running?
    pub fn is_active(&self) -> bool {
        self.tour.is_some()
    }

    /// The current phase, if a tour is running.
    pub fn phase(&self) -> Option<TourPhase> {
        self.tour.as_ref().map(|tour| tour.phase)
    }

    /// The stop being visited, if a tour is running.
    pub fn current_stop(&self) -> Option<&PointOfInterest> {
        self.tour.as_ref().and_then(|tour| tour.stops.get(tour.index))
    }

    /// The stops in visiting order, if a tour is running.
    pub fn stops(&self) -> &[PointOfInterest] {
        match &self.tour {
            Some(tour) => tour.stops.as_slice(),
            None => &[],
        }
    }

    /// Start a tour over `points`, replacing any tour in progress. The points are reordered so
    /// the tour moves along each wall in turn. Returns the first transit, or `None` without
    /// starting if there are no points.
    pub fn start(
        &mut self,
        settings: &TourSettings,
        points: &[PointOfInterest],
        eye_height: f32,
    ) -> Option<NavigationTarget> {
        if points.is_empty() {
            warn!("Tour requested with no points of interest");
            return None;
        }
        let mut stops = points.to_vec();
        reorder::snake_reorder(&mut stops, settings.wall_tolerance);
        info!("Starting tour of {} points", stops.len());

        let tour = self.tour.insert(Tour {
            stops,
            index: 0,
            phase: TourPhase::Approach,
        });
        Some(tour.approach(settings, eye_height))
    }

    /// Stop the tour. Returns `true` if one was running.
    pub fn abort(&mut self) -> bool {
        let was_active = self.tour.take().is_some();
        if was_active {
            info!("Tour aborted");
        }
        was_active
    }

    /// The transit for the current phase arrived.
    pub fn on_arrival(
        &mut self,
        settings: &TourSettings,
        now: Duration,
        eye_height: f32,
    ) -> TourStep {
        let Some(tour) = self.tour.as_mut() else {
            return TourStep::Wait;
        };
        match tour.phase {
            TourPhase::Approach => {
                tour.phase = TourPhase::Stepback;
                debug!("Tour stop {}: stepping back", tour.index);
                TourStep::Transit(tour.target(settings.stepback_distance, eye_height))
            }
            TourPhase::Stepback => {
                tour.phase = TourPhase::Pause {
                    until: now + settings.pause,
                };
                debug!("Tour stop {}: pausing", tour.index);
                TourStep::Wait
            }
            TourPhase::CenterTransit => {
                tour.phase = TourPhase::Approach;
                TourStep::Transit(tour.approach(settings, eye_height))
            }
            TourPhase::Pause { .. } => TourStep::Wait,
        }
    }

    /// Check the pause deadline. Call once per frame while no transit is running.
    pub fn poll(&mut self, settings: &TourSettings, now: Duration, eye_height: f32) -> TourStep {
        let Some(tour) = self.tour.as_mut() else {
            return TourStep::Wait;
        };
        let TourPhase::Pause { until } = tour.phase else {
            return TourStep::Wait;
        };
        if now < until {
            return TourStep::Wait;
        }

        let previous = tour.index;
        tour.index += 1;
        let Some(next) = tour.stops.get(tour.index) else {
            info!("Tour completed");
            self.tour = None;
            return TourStep::Finished;
        };

        let from = &tour.stops[previous];
        if reorder::same_wall(from.normal, next.normal, settings.wall_tolerance) {
            tour.phase = TourPhase::Approach;
            return TourStep::Transit(tour.approach(settings, eye_height));
        }

        debug!("Tour stop {}: crossing the room", tour.index);
        let target = NavigationTarget {
            position: Vec3::new(
                settings.room_center_x,
                eye_height,
                (from.center.z + next.center.z) / 2.0,
            ),
            look_at: next.center,
        };
        tour.phase = TourPhase::CenterTransit;
        TourStep::Transit(target)
    }
}

impl Tour {
    fn target(&self, distance: f32, eye_height: f32) -> NavigationTarget {
        let stop = &self.stops[self.index];
        NavigationTarget::in_front_of(stop.center, stop.normal, distance, eye_height)
    }

    fn approach(&self, settings: &TourSettings, eye_height: f32) -> NavigationTarget {
        debug!("Tour stop {}: approaching", self.index);
        self.target(settings.approach_distance, eye_height)
    }
}
