//! Ray-based collision probing against the scene.

use bevy_math::prelude::*;
use bevy_picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy_reflect::prelude::*;

/// A ray hit against scene geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Distance from the ray origin to the hit.
    pub distance: f32,
    /// World space surface normal at the hit.
    pub normal: Vec3,
}

/// Scene geometry that can be queried with rays.
///
/// Implemented for [`MeshRayCast`] so the controller can collide with any mesh in the world, and
/// for closures so callers can supply their own collision shapes.
pub trait SceneGeometry {
    /// Return the closest hit along `ray` no further than `max_distance`.
    fn cast_ray(&mut self, ray: Ray3d, max_distance: f32) -> Option<SurfaceHit>;
}

impl SceneGeometry for MeshRayCast<'_, '_> {
    fn cast_ray(&mut self, ray: Ray3d, max_distance: f32) -> Option<SurfaceHit> {
        let settings = MeshRayCastSettings::default().with_visibility(RayCastVisibility::Any);
        MeshRayCast::cast_ray(self, ray, &settings)
            .iter()
            .map(|(_, hit)| hit)
            .find(|hit| hit.distance <= max_distance)
            .map(|hit| SurfaceHit {
                distance: hit.distance,
                normal: hit.normal,
            })
    }
}

impl<F> SceneGeometry for F
where
    F: FnMut(Ray3d, f32) -> Option<SurfaceHit>,
{
    fn cast_ray(&mut self, ray: Ray3d, max_distance: f32) -> Option<SurfaceHit> {
        self(ray, max_distance)
    }
}

/// Where and how far collision rays are cast.
#[derive(Debug, Clone, Reflect)]
pub struct CollisionSettings {
    /// World space heights of the probe rays. Several heights catch thin obstacles such as rails
    /// that a single ray would pass over or under.
    pub ray_heights: Vec<f32>,
    /// How far ahead of the camera a surface blocks movement.
    pub range: f32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            ray_heights: vec![0.2, 0.8, 1.4],
            range: 0.5,
        }
    }
}

/// The result of probing for a surface in the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe {
    /// Nothing within range.
    Clear,
    /// A surface is within range.
    Blocked {
        /// The surface normal flattened onto the horizontal plane, or `None` if the surface
        /// faces straight up or down.
        normal: Option<Dir3>,
    },
}

impl Probe {
    /// Is movement blocked?
    pub fn is_blocked(&self) -> bool {
        matches!(self, Probe::Blocked { .. })
    }
}

/// Probe along `direction` from `position`, casting one ray per configured height and stopping at
/// the first hit. A zero direction never collides.
pub fn probe(
    geometry: &mut impl SceneGeometry,
    settings: &CollisionSettings,
    position: Vec3,
    direction: Vec3,
) -> Probe {
    let Ok(direction) = Dir3::new(direction) else {
        return Probe::Clear;
    };
    settings
        .ray_heights
        .iter()
        .find_map(|&height| {
            let origin = Vec3::new(position.x, height, position.z);
            geometry.cast_ray(Ray3d::new(origin, direction), settings.range)
        })
        .map_or(Probe::Clear, |hit| Probe::Blocked {
            normal: Dir3::new(hit.normal.with_y(0.0)).ok(),
        })
}

/// Axis-aligned walls for exercising collision in tests.
#[cfg(test)]
pub(crate) mod test_geometry {
    use super::*;

    /// An unbounded vertical plane between `bottom` and `top`.
    #[derive(Debug, Clone, Copy)]
    pub struct Wall {
        pub plane: Vec3,
        pub normal: Vec3,
        pub top: f32,
        pub bottom: f32,
    }

    impl Wall {
        pub fn facing(plane: Vec3, normal: Vec3) -> Self {
            Self {
                plane,
                normal,
                top: 3.0,
                bottom: 0.0,
            }
        }
    }

    #[derive(Debug, Clone, Default)]
    pub struct Walls(pub Vec<Wall>);

    impl SceneGeometry for Walls {
        fn cast_ray(&mut self, ray: Ray3d, max_distance: f32) -> Option<SurfaceHit> {
            self.0
                .iter()
                .filter_map(|wall| {
                    let denom = ray.direction.dot(wall.normal);
                    if denom.abs() <= f32::EPSILON {
                        return None;
                    }
                    let distance = (wall.plane - ray.origin).dot(wall.normal) / denom;
                    let point = ray.get_point(distance);
                    (distance >= 0.0
                        && distance <= max_distance
                        && point.y >= wall.bottom
                        && point.y <= wall.top)
                        .then_some(SurfaceHit {
                            distance,
                            normal: wall.normal,
                        })
                })
                .min_by(|a, b| a.distance.total_cmp(&b.distance))
        }
    }
}
