//! Per-frame keyboard input resource.
//!
//! Captures the keys the previewer reacts to and exposes them via the
//! [`InputState`] resource. Arrow keys drive selection and zoom, `X`/`Y`
//! toggle mirroring, `+`/`-` change the frame rate.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Resource capturing the per-frame keyboard state of the preview controls.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub previous_animation: BoolState,
    pub next_animation: BoolState,
    pub zoom_in: BoolState,
    pub zoom_out: BoolState,
    pub zoom_reset: BoolState,
    pub fps_up: BoolState,
    pub fps_down: BoolState,
    pub mirror_x: BoolState,
    pub mirror_y: BoolState,
    pub mode_debug: BoolState,
    /// Mouse wheel movement this frame, in notches.
    pub wheel: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            previous_animation: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            next_animation: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            zoom_in: BoolState::bound_to(KeyboardKey::KEY_UP),
            zoom_out: BoolState::bound_to(KeyboardKey::KEY_DOWN),
            zoom_reset: BoolState::bound_to(KeyboardKey::KEY_ZERO),
            fps_up: BoolState::bound_to(KeyboardKey::KEY_EQUAL),
            fps_down: BoolState::bound_to(KeyboardKey::KEY_MINUS),
            mirror_x: BoolState::bound_to(KeyboardKey::KEY_X),
            mirror_y: BoolState::bound_to(KeyboardKey::KEY_Y),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
            wheel: 0.0,
        }
    }
}

impl InputState {
    /// All bindings, for polling in one pass.
    pub fn bindings_mut(&mut self) -> [&mut BoolState; 10] {
        [
            &mut self.previous_animation,
            &mut self.next_animation,
            &mut self.zoom_in,
            &mut self.zoom_out,
            &mut self.zoom_reset,
            &mut self.fps_up,
            &mut self.fps_down,
            &mut self.mirror_x,
            &mut self.mirror_y,
            &mut self.mode_debug,
        ]
    }
}
