//! A procedural head sway played while a celebration is active.

use bevy_reflect::prelude::*;

/// Rotation offsets produced by the [`IdleAnimator`], in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadSway {
    /// Added to the camera's yaw when rendering.
    pub yaw: f32,
    /// Replaces the camera's pitch.
    pub pitch: f32,
    /// Rendered roll.
    pub roll: f32,
}

impl HeadSway {
    /// The sway `seconds` into the animation: a slow sway with a faster flutter on top. The
    /// frequencies are not multiples of each other, so the motion does not visibly loop.
    pub fn at(seconds: f32) -> Self {
        let t = seconds;
        Self {
            yaw: 0.35 * (t * 1.3).sin() + 0.08 * (t * 5.1).sin(),
            pitch: 0.15 * (t * 2.0 + 0.5).sin() + 0.05 * (t * 7.3).cos(),
            roll: 0.12 * (t * 1.7).sin() + 0.04 * (t * 6.2).cos(),
        }
    }
}

/// Plays [`HeadSway`] while active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct IdleAnimator {
    active: bool,
    elapsed: f32,
}

impl IdleAnimator {
    /// Start the animation from the beginning.
    pub fn start(&mut self) {
        self.active = true;
        self.elapsed = 0.0;
    }

    /// Stop the animation. Returns `true` if it was playing.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    /// Is the animation playing?
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance by `delta_seconds` and return the sway for this frame, or `None` if inactive.
    pub fn advance(&mut self, delta_seconds: f32) -> Option<HeadSway> {
        if !self.active {
            return None;
        }
        self.elapsed += delta_seconds;
        Some(HeadSway::at(self.elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::orientation::MAX_PITCH;

    #[test]
    fn inactive_produces_nothing() {
        let mut idle = IdleAnimator::default();
        assert_eq!(idle.advance(0.1), None);
    }

    #[test]
    fn sway_moves_and_stays_in_range() {
        let mut idle = IdleAnimator::default();
        idle.start();
        let mut previous = idle.advance(0.0).unwrap();
        let mut changed = false;
        for _ in 0..600 {
            let sway = idle.advance(1.0 / 60.0).unwrap();
            assert!(sway.pitch.abs() <= MAX_PITCH);
            changed |= sway != previous;
            previous = sway;
        }
        assert!(changed);
    }

    #[test]
    fn stop_reports_previous_state() {
        let mut idle = IdleAnimator::default();
        assert!(!idle.stop());
        idle.start();
        assert!(idle.stop());
        assert!(!idle.is_active());
    }
}
