//! Autonomous transit: smoothly moves and turns the camera toward a target pose.

use std::time::Duration;

use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

use super::orientation::{shortest_angle, yaw_towards, Orientation};

/// Where a transit should end, and what the camera should face when it gets there.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct NavigationTarget {
    /// Final camera position.
    pub position: Vec3,
    /// Point the camera turns to face.
    pub look_at: Vec3,
}

impl NavigationTarget {
    /// A target `distance` in front of a wall-mounted point along its `normal`, at `eye_height`,
    /// looking back at the point's center.
    pub fn in_front_of(center: Vec3, normal: Vec3, distance: f32, eye_height: f32) -> Self {
        Self {
            position: Vec3::new(
                center.x + normal.x * distance,
                eye_height,
                center.z + normal.z * distance,
            ),
            look_at: center.with_y(eye_height),
        }
    }
}

/// Transit speed and arrival tolerances.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct NavigatorSettings {
    /// Exponential approach rate per second. Each frame the camera covers `rate * dt` of the
    /// remaining distance and rotation.
    pub rate: f32,
    /// The transit has arrived once it is closer than this to its target...
    pub arrival_distance: f32,
    /// ...and the remaining yaw is smaller than this, in radians.
    pub arrival_angle: f32,
    /// Abandon a transit that has not arrived after this long. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            rate: 3.0,
            arrival_distance: 0.05,
            arrival_angle: 0.02,
            timeout: Some(Duration::from_secs(15)),
        }
    }
}

impl NavigatorSettings {
    /// Have both arrival conditions been met?
    pub fn has_arrived(&self, distance: f32, angle: f32) -> bool {
        distance < self.arrival_distance && angle.abs() < self.arrival_angle
    }
}

/// Why a transit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitEnd {
    /// The target pose was reached.
    Arrived,
    /// Live movement input interrupted the transit.
    Cancelled,
    /// The transit ran longer than [`NavigatorSettings::timeout`].
    TimedOut,
}

/// The navigator's current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub enum Navigator {
    /// Not moving the camera.
    #[default]
    Idle,
    /// Moving toward `target`.
    Transiting {
        /// The pose being approached.
        target: NavigationTarget,
        /// When the transit began, as time since startup.
        started: Duration,
    },
}

impl Navigator {
    /// Begin a transit, replacing any transit already underway.
    pub fn start_transit(&mut self, target: NavigationTarget, now: Duration) {
        *self = Navigator::Transiting {
            target,
            started: now,
        };
    }

    /// Stop without arriving.
    pub fn cancel(&mut self) {
        *self = Navigator::Idle;
    }

    /// Is a transit underway?
    pub fn is_transiting(&self) -> bool {
        matches!(self, Navigator::Transiting { .. })
    }

    /// The active target, if any.
    pub fn target(&self) -> Option<&NavigationTarget> {
        match self {
            Navigator::Idle => None,
            Navigator::Transiting { target, .. } => Some(target),
        }
    }

    /// Advance the transit by one frame, moving `position` and turning `orientation`.
    ///
    /// Any held movement cancels the transit before anything moves. Returns how the transit ended
    /// if it ended this frame.
    pub fn update(
        &mut self,
        settings: &NavigatorSettings,
        position: &mut Vec3,
        orientation: &mut Orientation,
        movement_held: bool,
        delta_seconds: f32,
        now: Duration,
    ) -> Option<TransitEnd> {
        let Navigator::Transiting { target, started } = *self else {
            return None;
        };
        if movement_held {
            self.cancel();
            return Some(TransitEnd::Cancelled);
        }

        let t = (settings.rate * delta_seconds).clamp(0.0, 1.0);
        *position = position.lerp(target.position, t);

        let yaw_error = yaw_towards(*position, target.look_at)
            .map(|yaw| shortest_angle(orientation.yaw(), yaw))
            .unwrap_or(0.0);
        orientation.turn(yaw_error * t);
        orientation.set_pitch(orientation.pitch() * (1.0 - t));

        if settings.has_arrived(position.distance(target.position), yaw_error) {
            self.cancel();
            return Some(TransitEnd::Arrived);
        }
        if settings
            .timeout
            .is_some_and(|timeout| now.saturating_sub(started) >= timeout)
        {
            self.cancel();
            return Some(TransitEnd::TimedOut);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn run_until_end(
        navigator: &mut Navigator,
        settings: &NavigatorSettings,
        position: &mut Vec3,
        orientation: &mut Orientation,
    ) -> (TransitEnd, u32) {
        for frame in 1..10_000 {
            let now = Duration::from_secs_f32(frame as f32 * FRAME);
            if let Some(end) = navigator.update(settings, position, orientation, false, FRAME, now)
            {
                return (end, frame);
            }
        }
        panic!("transit never ended");
    }

    #[test]
    fn arrival_needs_distance_and_angle() {
        let settings = NavigatorSettings::default();
        assert!(!settings.has_arrived(0.04, 0.05));
        assert!(settings.has_arrived(0.04, 0.01));
        assert!(!settings.has_arrived(0.06, 0.01));
        assert!(settings.has_arrived(0.04, -0.01));
    }

    #[test]
    fn in_front_of_uses_normal_and_eye_height() {
        let target = NavigationTarget::in_front_of(Vec3::new(-4.0, 2.0, 3.0), Vec3::X, 1.5, 1.6);
        assert_eq!(target.position, Vec3::new(-2.5, 1.6, 3.0));
        assert_eq!(target.look_at, Vec3::new(-4.0, 1.6, 3.0));
    }

    #[test]
    fn transit_converges_and_faces_target() {
        let settings = NavigatorSettings::default();
        let target = NavigationTarget::in_front_of(Vec3::new(-4.0, 2.0, 3.0), Vec3::X, 1.5, 1.6);
        let mut navigator = Navigator::default();
        let mut position = Vec3::new(0.0, 1.6, -5.0);
        let mut orientation = Orientation::new(0.0, 0.8);
        navigator.start_transit(target, Duration::ZERO);

        let (end, _) = run_until_end(&mut navigator, &settings, &mut position, &mut orientation);
        assert_eq!(end, TransitEnd::Arrived);
        assert!(!navigator.is_transiting());
        assert!(position.distance(target.position) < settings.arrival_distance);
        assert!(orientation.flat_forward().abs_diff_eq(Vec3::NEG_X, 0.03));
        assert!(orientation.pitch().abs() < 0.01);
    }

    #[test]
    fn movement_cancels_immediately() {
        let settings = NavigatorSettings::default();
        let mut navigator = Navigator::default();
        let target = NavigationTarget {
            position: Vec3::new(5.0, 1.6, 0.0),
            look_at: Vec3::new(10.0, 1.6, 0.0),
        };
        navigator.start_transit(target, Duration::ZERO);
        let mut position = Vec3::new(0.0, 1.6, 0.0);
        let mut orientation = Orientation::default();
        let end = navigator.update(
            &settings,
            &mut position,
            &mut orientation,
            true,
            FRAME,
            Duration::from_millis(16),
        );
        assert_eq!(end, Some(TransitEnd::Cancelled));
        assert_eq!(position, Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(navigator, Navigator::Idle);
    }

    #[test]
    fn new_target_replaces_old() {
        let mut navigator = Navigator::default();
        let first = NavigationTarget {
            position: Vec3::X,
            look_at: Vec3::ZERO,
        };
        let second = NavigationTarget {
            position: Vec3::Z,
            look_at: Vec3::ZERO,
        };
        navigator.start_transit(first, Duration::ZERO);
        navigator.start_transit(second, Duration::from_secs(1));
        assert_eq!(navigator.target(), Some(&second));
    }

    #[test]
    fn unreachable_look_at_times_out() {
        let settings = NavigatorSettings {
            timeout: Some(Duration::from_secs(2)),
            ..Default::default()
        };
        let mut navigator = Navigator::default();
        // A zero-length frame never makes progress.
        let target = NavigationTarget {
            position: Vec3::new(1.0e6, 1.6, 0.0),
            look_at: Vec3::new(1.0e6, 1.6, 10.0),
        };
        navigator.start_transit(target, Duration::ZERO);
        let mut position = Vec3::new(0.0, 1.6, 0.0);
        let mut orientation = Orientation::default();
        let end = navigator.update(
            &settings,
            &mut position,
            &mut orientation,
            false,
            0.0,
            Duration::from_secs(3),
        );
        assert_eq!(end, Some(TransitEnd::TimedOut));
    }

    #[test]
    fn rate_is_clamped() {
        let settings = NavigatorSettings::default();
        let mut navigator = Navigator::default();
        let target = NavigationTarget {
            position: Vec3::new(2.0, 1.6, 0.0),
            look_at: Vec3::new(2.0, 1.6, -10.0),
        };
        navigator.start_transit(target, Duration::ZERO);
        let mut position = Vec3::new(0.0, 1.6, 0.0);
        let mut orientation = Orientation::default();
        let end = navigator.update(
            &settings,
            &mut position,
            &mut orientation,
            false,
            10.0,
            Duration::from_secs(10),
        );
        assert_eq!(position, target.position);
        assert_eq!(end, Some(TransitEnd::Arrived));
    }
}
