#![warn(missing_docs)]

//! A first-person walking camera for exploring a static scene, with collision sliding,
//! click-to-approach transits, and guided tours of wall-mounted points of interest.
//!
//! ## Usage
//!
//! 1. Add the [`DefaultWalkCamPlugins`] plugin group.
//! 2. Add [`WalkCam`](prelude::WalkCam) to a camera, positioned at eye height.
//! 3. Send [`WalkCamCommand`](prelude::WalkCamCommand) events to hand the camera its points of
//!    interest, start a tour, or approach a point, and read
//!    [`WalkCamNotification`](prelude::WalkCamNotification) events to learn how tours end.
//!
//! ## Controls
//!
//! - `WASD` or the arrow keys walk, once pointer lock is engaged with a click.
//! - The mouse looks around while the pointer is locked; `Escape` releases it.
//! - On touch devices, dragging looks around and on-screen buttons (sent as
//!   [`WalkCamCommand::VirtualButton`](prelude::WalkCamCommand::VirtualButton)) walk.
//! - Any movement input interrupts a transit or a tour.

pub mod controller;
pub mod events;
pub mod extensions;
pub mod input;
pub mod tour;

use bevy_app::{PluginGroup, PluginGroupBuilder};

/// Common imports.
pub mod prelude {
    pub use crate::{
        controller::{
            component::WalkCam,
            inputs::{InputProfile, MoveAxis},
            navigator::NavigationTarget,
            WalkCamPlugin,
        },
        events::{NotificationKind, WalkCamCommand, WalkCamNotification},
        tour::{PointOfInterest, TourOutcome},
        DefaultWalkCamPlugins,
    };
}

/// Adds the walking camera controller and its default extensions.
pub struct DefaultWalkCamPlugins;

impl PluginGroup for DefaultWalkCamPlugins {
    #[allow(clippy::let_and_return)]
    fn build(self) -> PluginGroupBuilder {
        let group = PluginGroupBuilder::start::<Self>().add(controller::WalkCamPlugin);

        #[cfg(feature = "extension_tour_indicator")]
        let group = group.add(extensions::tour_indicator::TourIndicatorPlugin);

        group
    }
}
