//! Free walking: turns held movement axes into a horizontal step, sliding along walls.

use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

use super::{
    collision::{probe, CollisionSettings, Probe, SceneGeometry},
    inputs::MovementFlags,
    orientation::Orientation,
};

/// Walking speed and wall sliding behavior.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct LocomotionSettings {
    /// Walking speed in world units per second.
    pub speed: f32,
    /// Fraction of `speed` used while sliding along a wall.
    pub slide_factor: f32,
    /// Slides shorter than this (squared, before normalizing) are treated as head-on and stop
    /// the camera.
    pub min_slide_length_squared: f32,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            speed: 3.0,
            slide_factor: 0.7,
            min_slide_length_squared: 0.001,
        }
    }
}

/// How the camera moved during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Moved unobstructed.
    Direct(Vec3),
    /// Blocked, but slid along the surface.
    Slide(Vec3),
    /// Blocked with no usable slide.
    Stopped,
}

impl Step {
    /// The displacement of this step.
    pub fn displacement(&self) -> Vec3 {
        match self {
            Step::Direct(offset) | Step::Slide(offset) => *offset,
            Step::Stopped => Vec3::ZERO,
        }
    }
}

/// The normalized horizontal direction requested by `movement`, relative to the camera's yaw.
/// Returns `None` when nothing is held or opposing axes cancel out.
pub fn movement_direction(movement: MovementFlags, orientation: &Orientation) -> Option<Vec3> {
    let forward = orientation.flat_forward();
    let right = orientation.flat_right();
    let mut direction = Vec3::ZERO;
    if movement.forward {
        direction += forward;
    }
    if movement.backward {
        direction -= forward;
    }
    if movement.left {
        direction -= right;
    }
    if movement.right {
        direction += right;
    }
    direction.try_normalize()
}

/// The component of `direction` that runs along a surface with the given `normal`, before
/// normalizing.
pub fn slide_vector(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - normal * direction.dot(normal)
}

/// Advance one frame in `direction` from `position`.
pub fn step(
    geometry: &mut impl SceneGeometry,
    collision: &CollisionSettings,
    settings: &LocomotionSettings,
    position: Vec3,
    direction: Vec3,
    delta_seconds: f32,
) -> Step {
    let distance = settings.speed * delta_seconds;
    let normal = match probe(geometry, collision, position, direction) {
        Probe::Clear => return Step::Direct(direction * distance),
        Probe::Blocked { normal: None } => return Step::Stopped,
        Probe::Blocked {
            normal: Some(normal),
        } => normal,
    };

    let slide = slide_vector(direction, *normal);
    if slide.length_squared() <= settings.min_slide_length_squared {
        return Step::Stopped;
    }
    let slide = slide.normalize();
    if probe(geometry, collision, position, slide).is_blocked() {
        return Step::Stopped;
    }
    Step::Slide(slide * distance * settings.slide_factor)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_1_SQRT_2;

    use super::*;
    use crate::controller::collision::test_geometry::*;

    fn corridor() -> Walls {
        // Wall at z = -1 facing +Z, wall at x = 1 facing -X.
        Walls(vec![
            Wall::facing(Vec3::new(0.0, 0.0, -1.0), Vec3::Z),
            Wall::facing(Vec3::new(1.0, 0.0, 0.0), Vec3::NEG_X),
        ])
    }

    #[test]
    fn opposing_axes_cancel() {
        let movement = MovementFlags {
            forward: true,
            backward: true,
            ..Default::default()
        };
        assert_eq!(movement_direction(movement, &Orientation::default()), None);
    }

    #[test]
    fn diagonal_is_normalized() {
        let movement = MovementFlags {
            forward: true,
            right: true,
            ..Default::default()
        };
        let direction = movement_direction(movement, &Orientation::default()).unwrap();
        assert!(direction.abs_diff_eq(Vec3::new(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2), 1e-6));
    }

    #[test]
    fn slide_is_perpendicular_to_normal() {
        let direction = Vec3::new(0.6, 0.0, -0.8);
        let normal = Vec3::Z;
        let slide = slide_vector(direction, normal);
        assert!(slide.dot(normal).abs() < 1e-6);
        assert!(slide.normalize().abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn unblocked_moves_at_full_speed() {
        let mut walls = Walls::default();
        let step = step(
            &mut walls,
            &CollisionSettings::default(),
            &LocomotionSettings::default(),
            Vec3::new(0.0, 1.6, 0.0),
            Vec3::NEG_Z,
            0.5,
        );
        assert_eq!(step, Step::Direct(Vec3::new(0.0, 0.0, -1.5)));
    }

    #[test]
    fn blocked_diagonal_slides_along_wall() {
        let mut walls = corridor();
        let direction = Vec3::new(-0.6, 0.0, -0.8);
        let Step::Slide(offset) = step(
            &mut walls,
            &CollisionSettings::default(),
            &LocomotionSettings::default(),
            Vec3::new(0.0, 1.6, -0.8),
            direction,
            0.1,
        ) else {
            panic!("expected a slide");
        };
        assert!(offset.z.abs() < 1e-6);
        assert!((offset.length() - 3.0 * 0.1 * 0.7).abs() < 1e-5);
        assert!(offset.x < 0.0);
    }

    #[test]
    fn head_on_stops() {
        let mut walls = corridor();
        let step = step(
            &mut walls,
            &CollisionSettings::default(),
            &LocomotionSettings::default(),
            Vec3::new(0.0, 1.6, -0.8),
            Vec3::NEG_Z,
            0.1,
        );
        assert_eq!(step, Step::Stopped);
    }

    #[test]
    fn corner_stops_when_slide_is_blocked() {
        let mut walls = corridor();
        let step = step(
            &mut walls,
            &CollisionSettings::default(),
            &LocomotionSettings::default(),
            Vec3::new(0.8, 1.6, -0.8),
            Vec3::new(0.6, 0.0, -0.8),
            0.1,
        );
        assert_eq!(step, Step::Stopped);
    }
}
