//! The primary [`Component`] of the controller, [`WalkCam`].

use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_picking::mesh_picking::ray_cast::MeshRayCast;
use bevy_reflect::prelude::*;
use bevy_render::prelude::*;
use bevy_time::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::RequestRedraw;

use super::{
    collision::{CollisionSettings, SceneGeometry},
    idle::IdleAnimator,
    inputs::{InputAggregator, InputProfile, LookSettings},
    locomotion::{self, LocomotionSettings},
    navigator::{NavigationTarget, Navigator, NavigatorSettings, TransitEnd},
    orientation::Orientation,
};
use crate::{
    events::{NotificationKind, WalkCamCommand, WalkCamNotification},
    tour::{
        visited::{VisitSettings, VisitedSet},
        PointOfInterest, TourOutcome, TourSequencer, TourSettings, TourStep,
    },
};

/// Tracks all state of a walking camera: its inputs, orientation, transit, tour, and settings.
///
/// See the documentation on the contained fields and types to learn more about each setting.
///
/// # Moving the Camera
///
/// The [`WalkCamPlugin`](crate::controller::WalkCamPlugin) feeds keyboard, mouse, and touch input
/// to every camera, and applies [`WalkCamCommand`] events at the start of each frame. Everything
/// the camera does happens inside [`WalkCam::update`], once per frame:
///
/// 1. Commands and input events only record what was asked for.
/// 2. The celebration sway, if playing, takes over the camera entirely.
/// 3. Otherwise look input turns the camera, a running transit moves it (or is cancelled by
///    movement input), the tour advances, and free walking moves it when nothing else is.
/// 4. The camera is pinned to [`WalkCam::eye_height`] and the rotation is written.
///
/// Outcomes are reported with [`WalkCamNotification`] events.
#[derive(Debug, Clone, Reflect, Component)]
pub struct WalkCam {
    /// The fixed height of the camera above the floor.
    pub eye_height: f32,
    /// Look sensitivity.
    pub look: LookSettings,
    /// Walking speed and wall sliding.
    pub locomotion: LocomotionSettings,
    /// Collision ray heights and range.
    pub collision: CollisionSettings,
    /// Transit speed, arrival tolerances, and timeout.
    pub navigation: NavigatorSettings,
    /// Tour distances and timings.
    pub tour_settings: TourSettings,
    /// What counts as having visited a point of interest.
    pub visits: VisitSettings,
    /// Current look direction. Managed by the controller, but exposed so the camera can be
    /// turned manually.
    pub orientation: Orientation,
    /// Pending input. Managed by the input systems.
    pub input: InputAggregator,
    navigator: Navigator,
    tour: TourSequencer,
    idle: IdleAnimator,
    points: Vec<PointOfInterest>,
    visited: VisitedSet,
}

impl Default for WalkCam {
    fn default() -> Self {
        Self {
            eye_height: 1.6,
            look: Default::default(),
            locomotion: Default::default(),
            collision: Default::default(),
            navigation: Default::default(),
            tour_settings: Default::default(),
            visits: Default::default(),
            orientation: Default::default(),
            input: Default::default(),
            navigator: Default::default(),
            tour: Default::default(),
            idle: Default::default(),
            points: Default::default(),
            visited: Default::default(),
        }
    }
}

impl WalkCam {
    /// Create a camera for a device with the given input capability.
    pub fn new(profile: InputProfile) -> Self {
        Self {
            input: InputAggregator::new(profile),
            ..Default::default()
        }
    }

    /// Start out facing `target` from `position`. Use with a matching [`Transform`].
    pub fn looking_at(self, position: Vec3, target: Vec3) -> Self {
        Self {
            orientation: Orientation::looking_at(position, target),
            ..self
        }
    }

    /// Set the eye height.
    pub fn with_eye_height(self, eye_height: f32) -> Self {
        Self { eye_height, ..self }
    }

    /// The transit in progress, if any.
    pub fn navigation_target(&self) -> Option<&NavigationTarget> {
        self.navigator.target()
    }

    /// The guided tour state.
    pub fn tour(&self) -> &TourSequencer {
        &self.tour
    }

    /// Is the celebration sway playing?
    pub fn is_celebrating(&self) -> bool {
        self.idle.is_active()
    }

    /// The points of interest most recently supplied.
    pub fn points_of_interest(&self) -> &[PointOfInterest] {
        &self.points
    }

    /// Points of interest visited so far.
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Is free walking allowed right now? Walking needs continuous input (a held pointer lock or
    /// a touch device) and is suspended during a transit or the celebration.
    pub fn can_walk(&self) -> bool {
        self.input.continuous_input_active()
            && !self.navigator.is_transiting()
            && !self.idle.is_active()
    }

    /// Begin a transit to `target`, replacing any running transit.
    pub fn start_transit(&mut self, target: NavigationTarget, now: Duration) {
        self.navigator.start_transit(target, now);
    }

    /// Apply one command. Notifications it causes are pushed onto `notifications`.
    pub fn apply_command(
        &mut self,
        command: &WalkCamCommand,
        now: Duration,
        notifications: &mut Vec<NotificationKind>,
    ) {
        match command {
            WalkCamCommand::PointsOfInterestReady(points) => {
                debug!("Received {} points of interest", points.len());
                self.points = points.clone();
                self.visited.reset();
            }
            WalkCamCommand::NavigateToPoint { center, normal } => {
                self.abort_tour(notifications);
                let Some(normal) = normal.with_y(0.0).try_normalize() else {
                    warn!("Ignoring navigation to {center}: normal {normal} is not horizontal");
                    return;
                };
                let target = NavigationTarget::in_front_of(
                    *center,
                    normal,
                    self.tour_settings.approach_distance,
                    self.eye_height,
                );
                self.navigator.start_transit(target, now);
            }
            WalkCamCommand::StartTour => {
                if self.idle.is_active() {
                    debug!("Ignoring tour request during celebration");
                    return;
                }
                if self.abort_tour(notifications) {
                    self.navigator.cancel();
                }
                let first_stop = self
                    .tour
                    .start(&self.tour_settings, &self.points, self.eye_height);
                if let Some(target) = first_stop {
                    self.navigator.start_transit(target, now);
                }
            }
            WalkCamCommand::StopTour => {
                if self.abort_tour(notifications) {
                    self.navigator.cancel();
                }
            }
            WalkCamCommand::ModeSelected => self.input.select_mode(),
            WalkCamCommand::CelebrationStart => {
                self.abort_tour(notifications);
                self.navigator.cancel();
                self.idle.start();
            }
            WalkCamCommand::CelebrationStop => {
                if self.idle.stop() {
                    self.orientation.set_pitch(0.0);
                }
            }
            WalkCamCommand::VirtualButton { axis, pressed } => {
                self.input.virtual_button(*axis, *pressed)
            }
        }
    }

    fn abort_tour(&mut self, notifications: &mut Vec<NotificationKind>) -> bool {
        let aborted = self.tour.abort();
        if aborted {
            notifications.push(NotificationKind::TourEnded(TourOutcome::Aborted));
        }
        aborted
    }

    /// Advance the camera by one frame, reading and writing `transform`. Notifications raised
    /// this frame are pushed onto `notifications`.
    ///
    /// Returns `true` if another frame should be drawn soon: the pose may have changed, or a tour
    /// is waiting on a deadline that only a later frame can observe.
    pub fn update(
        &mut self,
        transform: &mut Transform,
        geometry: &mut impl SceneGeometry,
        delta_time: Duration,
        now: Duration,
        notifications: &mut Vec<NotificationKind>,
    ) -> bool {
        let dt = delta_time.as_secs_f32();
        let intent = self.input.take_intent(&self.look);
        let mut position = transform.translation;

        if let Some(sway) = self.idle.advance(dt) {
            self.orientation.set_pitch(sway.pitch);
            transform.rotation = self.orientation.rotation_with_offsets(sway.yaw, sway.roll);
            transform.translation.y = self.eye_height;
            return true;
        }

        self.orientation.apply_look(intent.look);
        let mut moving = intent.look != Vec2::ZERO;

        if self.navigator.is_transiting() {
            moving = true;
            let end = self.navigator.update(
                &self.navigation,
                &mut position,
                &mut self.orientation,
                intent.movement.any(),
                dt,
                now,
            );
            match end {
                None => (),
                Some(TransitEnd::Arrived) => {
                    notifications.push(NotificationKind::Arrived);
                    let step = self.tour.on_arrival(&self.tour_settings, now, self.eye_height);
                    self.follow_tour(step, now, notifications);
                }
                Some(TransitEnd::Cancelled) => {
                    debug!("Transit cancelled by movement input");
                    self.abort_tour(notifications);
                }
                Some(TransitEnd::TimedOut) => {
                    warn!("Transit did not arrive in time, abandoning it");
                    self.abort_tour(notifications);
                }
            }
        }

        if self.tour.is_active() && !self.navigator.is_transiting() {
            if intent.movement.any() {
                debug!("Tour interrupted by movement input");
                self.abort_tour(notifications);
            } else {
                let step = self.tour.poll(&self.tour_settings, now, self.eye_height);
                self.follow_tour(step, now, notifications);
            }
        }

        let direction = locomotion::movement_direction(intent.movement, &self.orientation);
        if let Some(direction) = direction.filter(|_| self.can_walk()) {
            let step = locomotion::step(
                geometry,
                &self.collision,
                &self.locomotion,
                position,
                direction,
                dt,
            );
            position += step.displacement();
            moving = true;
        }

        position.y = self.eye_height;
        transform.translation = position;
        transform.rotation = self.orientation.rotation();

        if self.visited.observe(
            &self.visits,
            &self.points,
            position,
            self.orientation.flat_forward(),
        ) {
            info!("All {} points of interest visited", self.points.len());
            notifications.push(NotificationKind::AllPointsVisited);
        }

        moving || self.tour.is_active()
    }

    /// Run [`WalkCam::update`] on a copy of the pose and write it back only if it changed, so
    /// `Changed<Transform>` stays quiet while the camera stands still.
    fn update_pose(
        &mut self,
        transform: &mut Mut<Transform>,
        geometry: &mut impl SceneGeometry,
        delta_time: Duration,
        now: Duration,
        notifications: &mut Vec<NotificationKind>,
    ) -> bool {
        let mut pose = **transform;
        let redraw = self.update(&mut pose, geometry, delta_time, now, notifications);
        transform.set_if_neq(pose);
        redraw
    }

    fn follow_tour(
        &mut self,
        step: TourStep,
        now: Duration,
        notifications: &mut Vec<NotificationKind>,
    ) {
        match step {
            TourStep::Wait => (),
            TourStep::Transit(target) => self.navigator.start_transit(target, now),
            TourStep::Finished => {
                notifications.push(NotificationKind::TourEnded(TourOutcome::Completed))
            }
        }
    }

    /// Apply queued [`WalkCamCommand`]s to every camera. Runs at the start of the frame.
    pub fn receive_commands(
        mut commands: EventReader<WalkCamCommand>,
        mut cameras: Query<(Entity, &mut WalkCam)>,
        mut notifications: EventWriter<WalkCamNotification>,
        time: Res<Time>,
    ) {
        let mut raised = Vec::new();
        for command in commands.read() {
            for (camera, mut controller) in cameras.iter_mut() {
                controller.apply_command(command, time.elapsed(), &mut raised);
                notifications.write_batch(
                    raised
                        .drain(..)
                        .map(|kind| WalkCamNotification { camera, kind }),
                );
            }
        }
    }

    /// Update transforms for all cameras. Called once per frame.
    pub fn update_camera_positions(
        mut cameras: Query<(Entity, &mut WalkCam, &Camera, &mut Transform)>,
        mut ray_cast: MeshRayCast,
        mut notifications: EventWriter<WalkCamNotification>,
        mut redraw: EventWriter<RequestRedraw>,
        time: Res<Time>,
    ) {
        let mut raised = Vec::new();
        for (camera, mut controller, camera_component, mut transform) in cameras.iter_mut() {
            if !camera_component.is_active {
                continue;
            }
            let redraw_needed = controller.update_pose(
                &mut transform,
                &mut ray_cast,
                time.delta(),
                time.elapsed(),
                &mut raised,
            );
            if redraw_needed {
                redraw.write(RequestRedraw);
            }
            notifications.write_batch(
                raised
                    .drain(..)
                    .map(|kind| WalkCamNotification { camera, kind }),
            );
        }
    }
}
