//! A `bevy_walk_cam` extension that draws the camera's points of interest and its current
//! navigation target in the scene, so users can see where a tour is heading and which points they
//! have already seen.

use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_gizmos::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_transform::TransformSystem;

use crate::prelude::*;

/// See the [module](self) docs.
pub struct TourIndicatorPlugin;

impl Plugin for TourIndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            draw_tour.after(TransformSystem::TransformPropagate),
        )
        .register_type::<TourIndicator>();
    }
}

/// Optional. Configures whether or not a [`WalkCam`] should show its points of interest and
/// navigation target. The indicator will be enabled if this component is not present.
#[derive(Debug, Component, Reflect)]
pub struct TourIndicator {
    /// Should the indicator be visible on this camera?
    pub enabled: bool,
}

impl Default for TourIndicator {
    fn default() -> Self {
        Self { enabled: true }
    }
}

const UNVISITED: Color = Color::srgb(1.0, 1.0, 1.0);
const VISITED: Color = Color::srgb(0.3, 0.9, 0.4);
const CURRENT_STOP: Color = Color::srgb(1.0, 0.8, 0.2);
const TARGET: Color = Color::srgb(0.3, 0.6, 1.0);

/// Use gizmos to outline each point of interest, and mark the spot the camera is walking to.
pub fn draw_tour(cameras: Query<(&WalkCam, Option<&TourIndicator>)>, mut gizmos: Gizmos) {
    for (walk_cam, _) in cameras
        .iter()
        .filter(|(_, indicator)| indicator.map(|i| i.enabled).unwrap_or(true))
    {
        let current_stop = walk_cam.tour().current_stop();

        for (index, point) in walk_cam.points_of_interest().iter().enumerate() {
            let color = if current_stop.is_some_and(|stop| stop.center == point.center) {
                CURRENT_STOP
            } else if walk_cam.visited().contains(index) {
                VISITED
            } else {
                UNVISITED
            };
            // Lift the outline off the wall to keep it from z-fighting.
            let center = point.center + point.normal * 0.01;
            let facing = Quat::from_rotation_arc(Vec3::Z, point.normal);
            gizmos.rect(Isometry3d::new(center, facing), point.extent, color);
            gizmos.arrow(center, center + point.normal * 0.3, color);
        }

        let Some(target) = walk_cam.navigation_target() else {
            continue;
        };
        let floor = target.position - Vec3::Y * walk_cam.eye_height;
        let flat = Quat::from_rotation_arc(Vec3::Z, Vec3::Y);
        gizmos.circle(Isometry3d::new(floor + Vec3::Y * 0.01, flat), 0.25, TARGET);
        gizmos.line(target.position, target.look_at, TARGET);
    }
}
