//! Provides [`InputAggregator`], which folds keyboard, pointer, touch, and on-screen button
//! events into a single [`InputIntent`] each frame.

use bevy_input::keyboard::KeyCode;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

/// The input capability of the device, resolved once when the camera is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum InputProfile {
    /// Mouse look through pointer lock. On-screen walk buttons are ignored.
    #[default]
    PointerLock,
    /// Touch-drag look and on-screen walk buttons. Pointer lock is never engaged.
    TouchOnly,
}

impl InputProfile {
    /// Pick a profile from whether the device can produce touch input.
    pub fn detect(touch_capable: bool) -> Self {
        if touch_capable {
            Self::TouchOnly
        } else {
            Self::PointerLock
        }
    }
}

/// One of the four horizontal movement axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum MoveAxis {
    /// Walk toward the facing direction.
    Forward,
    /// Walk away from the facing direction.
    Backward,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
}

impl MoveAxis {
    /// The axis bound to a key, if any.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(Self::Forward),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(Self::Backward),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(Self::Left),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(Self::Right),
            _ => None,
        }
    }
}

/// The set of movement axes currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct MovementFlags {
    /// Forward is held.
    pub forward: bool,
    /// Backward is held.
    pub backward: bool,
    /// Strafe left is held.
    pub left: bool,
    /// Strafe right is held.
    pub right: bool,
}

impl MovementFlags {
    /// Set or clear one axis.
    pub fn set(&mut self, axis: MoveAxis, held: bool) {
        match axis {
            MoveAxis::Forward => self.forward = held,
            MoveAxis::Backward => self.backward = held,
            MoveAxis::Left => self.left = held,
            MoveAxis::Right => self.right = held,
        }
    }

    /// Is any axis held?
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Combine two flag sets, an axis is held if it is held in either.
    pub fn union(self, other: Self) -> Self {
        Self {
            forward: self.forward || other.forward,
            backward: self.backward || other.backward,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }
}

/// Look sensitivity.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct LookSettings {
    /// Radians of rotation per pixel of pointer motion.
    pub look_speed: f32,
    /// Extra factor applied to `look_speed` for touch drags.
    pub touch_multiplier: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self {
            look_speed: 0.002,
            touch_multiplier: 1.5,
        }
    }
}

/// What the user is asking the camera to do this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntent {
    /// Movement axes held by any source.
    pub movement: MovementFlags,
    /// Yaw (`x`) and pitch (`y`) change in radians.
    pub look: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
struct TrackedTouch {
    id: u64,
    last: Vec2,
}

/// Collects raw input events between frames. Events only write flags and deltas; the camera
/// update reads them once per frame with [`InputAggregator::take_intent`].
#[derive(Debug, Clone, Default, Reflect)]
pub struct InputAggregator {
    profile: InputProfile,
    keys: MovementFlags,
    buttons: MovementFlags,
    pointer_delta: Vec2,
    touch_delta: Vec2,
    touch: Option<TrackedTouch>,
    pointer_locked: bool,
    mode_selected: bool,
}

impl InputAggregator {
    /// Create an aggregator for the given device profile.
    pub fn new(profile: InputProfile) -> Self {
        Self {
            profile,
            ..Default::default()
        }
    }

    /// The device profile this aggregator was created with.
    pub fn profile(&self) -> InputProfile {
        self.profile
    }

    /// Handle a key press. Returns `false` for keys that are not bound.
    pub fn key_down(&mut self, key: KeyCode) -> bool {
        self.key(key, true)
    }

    /// Handle a key release. Returns `false` for keys that are not bound.
    pub fn key_up(&mut self, key: KeyCode) -> bool {
        self.key(key, false)
    }

    fn key(&mut self, key: KeyCode, held: bool) -> bool {
        let Some(axis) = MoveAxis::from_key(key) else {
            return false;
        };
        self.keys.set(axis, held);
        true
    }

    /// Handle an on-screen walk button. Ignored unless the profile is touch-only.
    pub fn virtual_button(&mut self, axis: MoveAxis, pressed: bool) {
        if self.profile == InputProfile::TouchOnly {
            self.buttons.set(axis, pressed);
        }
    }

    /// Open the gate that allows pointer lock to be engaged.
    pub fn select_mode(&mut self) {
        self.mode_selected = true;
    }

    /// Has the mode gate fired?
    pub fn mode_selected(&self) -> bool {
        self.mode_selected
    }

    /// May the host engage pointer lock right now?
    pub fn can_lock_pointer(&self) -> bool {
        self.profile == InputProfile::PointerLock && self.mode_selected
    }

    /// Record whether the host currently holds the pointer lock.
    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked && self.profile == InputProfile::PointerLock;
    }

    /// Is the pointer lock currently held?
    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Relative pointer motion in pixels. Only counted while the lock is held.
    pub fn pointer_motion(&mut self, delta: Vec2) {
        if self.pointer_locked && self.mode_selected {
            self.pointer_delta += delta;
        }
    }

    /// A touch began. Only the first touch is tracked for looking.
    pub fn touch_start(&mut self, id: u64, position: Vec2) {
        if self.profile != InputProfile::TouchOnly || self.touch.is_some() {
            return;
        }
        self.touch = Some(TrackedTouch { id, last: position });
    }

    /// A touch moved.
    pub fn touch_move(&mut self, id: u64, position: Vec2) {
        let Some(touch) = self.touch.as_mut().filter(|touch| touch.id == id) else {
            return;
        };
        self.touch_delta += position - touch.last;
        touch.last = position;
    }

    /// A touch ended or was cancelled.
    pub fn touch_end(&mut self, id: u64) {
        if self.touch.is_some_and(|touch| touch.id == id) {
            self.touch = None;
        }
    }

    /// The movement axes currently held by any source.
    pub fn movement(&self) -> MovementFlags {
        self.keys.union(self.buttons)
    }

    /// Does the device continuously drive the camera? True while the pointer is locked, or
    /// always on touch devices.
    pub fn continuous_input_active(&self) -> bool {
        self.pointer_locked || self.profile == InputProfile::TouchOnly
    }

    /// Drop all held movement, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keys = MovementFlags::default();
        self.buttons = MovementFlags::default();
        self.touch = None;
    }

    /// Build this frame's intent and reset the accumulated look deltas.
    pub fn take_intent(&mut self, settings: &LookSettings) -> InputIntent {
        let pixels = self.pointer_delta + self.touch_delta * settings.touch_multiplier;
        self.pointer_delta = Vec2::ZERO;
        self.touch_delta = Vec2::ZERO;
        InputIntent {
            movement: self.movement(),
            look: -pixels * settings.look_speed,
        }
    }
}
