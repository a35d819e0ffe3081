//! The walking camera controller.
//!
//! The pure building blocks live in their own modules and can be used without an ECS:
//! [`orientation`], [`inputs`], [`collision`], [`locomotion`], [`navigator`], and [`idle`].
//! [`component::WalkCam`] owns one of each and runs them together every frame.

pub mod collision;
pub mod component;
pub mod idle;
pub mod inputs;
pub mod locomotion;
pub mod navigator;
pub mod orientation;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::InputSystem;

use crate::{
    events::{NotificationKind, WalkCamCommand, WalkCamNotification},
    tour::{PointOfInterest, TourOutcome, TourPhase},
};

/// Adds the [`WalkCam`](component::WalkCam) systems, events, and reflected types.
pub struct WalkCamPlugin;

impl Plugin for WalkCamPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WalkCamCommand>()
            .add_event::<WalkCamNotification>()
            .add_systems(
                PreUpdate,
                (
                    component::WalkCam::receive_commands,
                    crate::input::collect_inputs,
                    component::WalkCam::update_camera_positions,
                )
                    .chain()
                    .after(InputSystem),
            )
            .register_type::<component::WalkCam>()
            .register_type::<orientation::Orientation>()
            .register_type::<inputs::InputProfile>()
            .register_type::<inputs::MoveAxis>()
            .register_type::<navigator::NavigationTarget>()
            .register_type::<PointOfInterest>()
            .register_type::<TourPhase>()
            .register_type::<TourOutcome>()
            .register_type::<NotificationKind>()
            .register_type::<WalkCamCommand>()
            .register_type::<WalkCamNotification>();
    }
}
