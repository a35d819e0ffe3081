//! Default input handling: forwards keyboard, mouse, and touch events from Bevy to each
//! [`WalkCam`]'s input aggregator, and manages the window's pointer lock.

use bevy_ecs::prelude::*;
use bevy_input::{
    keyboard::KeyboardInput, mouse::AccumulatedMouseMotion, prelude::*, touch::Touches,
    ButtonState,
};
use bevy_log::prelude::*;
use bevy_window::{CursorGrabMode, PrimaryWindow, Window};

use crate::prelude::*;

/// Feed this frame's raw input into every [`WalkCam`].
///
/// Pointer lock is engaged with a left click on the primary window once the camera's mode gate
/// has opened, and released with `Escape`. Losing window focus releases every held axis so keys
/// can't get stuck down.
pub fn collect_inputs(
    mut keyboard: EventReader<KeyboardInput>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    touches: Res<Touches>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut WalkCam>,
) {
    let key_events: Vec<_> = keyboard
        .read()
        .filter(|event| !event.repeat)
        .map(|event| (event.key_code, event.state))
        .collect();
    let mut window = windows.single_mut().ok();

    for mut controller in cameras.iter_mut() {
        let input = &mut controller.input;

        for &(key, state) in &key_events {
            match state {
                ButtonState::Pressed => input.key_down(key),
                ButtonState::Released => input.key_up(key),
            };
        }

        for touch in touches.iter_just_pressed() {
            input.touch_start(touch.id(), touch.position());
        }
        for touch in touches.iter() {
            input.touch_move(touch.id(), touch.position());
        }
        for touch in touches
            .iter_just_released()
            .chain(touches.iter_just_canceled())
        {
            input.touch_end(touch.id());
        }

        let Some(window) = window.as_deref_mut() else {
            input.set_pointer_locked(false);
            continue;
        };
        if !window.focused {
            input.release_all();
        }
        let locked = window.cursor_options.grab_mode != CursorGrabMode::None;
        let clicked = mouse_buttons.just_pressed(MouseButton::Left);
        if locked && keys.just_pressed(KeyCode::Escape) {
            debug!("Releasing pointer lock");
            set_pointer_lock(window, false);
        } else if !locked && clicked && input.can_lock_pointer() {
            debug!("Engaging pointer lock");
            set_pointer_lock(window, true);
        }
        input.set_pointer_locked(window.cursor_options.grab_mode != CursorGrabMode::None);
        input.pointer_motion(mouse_motion.delta);
    }
}

fn set_pointer_lock(window: &mut Window, locked: bool) {
    window.cursor_options.grab_mode = if locked {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    window.cursor_options.visible = !locked;
}
