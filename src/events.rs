//! Messages exchanged with the rest of the app.
//!
//! Other systems send [`WalkCamCommand`]s; every [`WalkCam`](crate::prelude::WalkCam) applies
//! them at the start of the next frame. The controller reports back with
//! [`WalkCamNotification`]s.

use bevy_ecs::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

use crate::{
    controller::inputs::MoveAxis,
    tour::{PointOfInterest, TourOutcome},
};

/// A request for every walking camera.
#[derive(Debug, Clone, Event, Reflect)]
pub enum WalkCamCommand {
    /// Replace the list of points of interest. Visits recorded so far are forgotten.
    PointsOfInterestReady(Vec<PointOfInterest>),
    /// Walk up to a single point, outside of any tour. Replaces any running transit and stops a
    /// running tour.
    NavigateToPoint {
        /// Center of the point.
        center: Vec3,
        /// Direction the point faces.
        normal: Vec3,
    },
    /// Reorder the points of interest and start a tour over them.
    StartTour,
    /// Stop a running tour.
    StopTour,
    /// The visitor picked a mode, so pointer lock may now be engaged.
    ModeSelected,
    /// Start the celebration head sway.
    CelebrationStart,
    /// Stop the celebration head sway.
    CelebrationStop,
    /// An on-screen walk button was pressed or released.
    VirtualButton {
        /// The axis the button drives.
        axis: MoveAxis,
        /// Whether the button is now held.
        pressed: bool,
    },
}

/// Something happened to a walking camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event, Reflect)]
pub struct WalkCamNotification {
    /// The camera this concerns.
    pub camera: Entity,
    /// What happened.
    pub kind: NotificationKind,
}

/// The kinds of [`WalkCamNotification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum NotificationKind {
    /// A tour ended, either because every stop was visited or because it was interrupted.
    TourEnded(TourOutcome),
    /// Every point of interest has now been visited. Sent once per list of points.
    AllPointsVisited,
    /// A transit reached its target.
    Arrived,
}
