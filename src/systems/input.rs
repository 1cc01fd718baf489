//! Input system.
//!
//! [`update_input_state`] reads keyboard, mouse wheel and dropped files from
//! raylib each frame, writes [`InputState`], and triggers:
//! - [`ControlEvent`] for every preview key just pressed and for wheel movement,
//! - [`SwitchDebugEvent`] for the debug key,
//! - [`LoadAssetEvent`] for every file dropped onto the window.
use std::path::PathBuf;

use bevy_ecs::prelude::*;
use log::info;

use crate::events::control::{ControlEvent, PreviewAction};
use crate::events::loadasset::LoadAssetEvent;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll raylib and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    for binding in input.bindings_mut() {
        binding.active = rl.is_key_down(binding.key_binding);
        binding.just_pressed = rl.is_key_pressed(binding.key_binding);
    }
    input.wheel = rl.get_mouse_wheel_move();

    for action in pressed_actions(&input) {
        commands.trigger(ControlEvent { action });
    }

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }

    if rl.is_file_dropped() {
        let dropped = rl.load_dropped_files();
        for path in dropped.paths() {
            info!("File dropped: {}", path);
            commands.trigger(LoadAssetEvent::new(PathBuf::from(path)));
        }
    }
}

/// Preview actions requested by this frame's input, in a fixed order.
pub fn pressed_actions(input: &InputState) -> Vec<PreviewAction> {
    let mut actions = Vec::new();
    let keyed = [
        (input.previous_animation.just_pressed, PreviewAction::PreviousAnimation),
        (input.next_animation.just_pressed, PreviewAction::NextAnimation),
        (input.zoom_in.just_pressed, PreviewAction::ZoomIn),
        (input.zoom_out.just_pressed, PreviewAction::ZoomOut),
        (input.zoom_reset.just_pressed, PreviewAction::ResetZoom),
        (input.fps_up.just_pressed, PreviewAction::FpsUp),
        (input.fps_down.just_pressed, PreviewAction::FpsDown),
        (input.mirror_x.just_pressed, PreviewAction::ToggleMirrorX),
        (input.mirror_y.just_pressed, PreviewAction::ToggleMirrorY),
    ];
    for (pressed, action) in keyed {
        if pressed {
            actions.push(action);
        }
    }
    if input.wheel != 0.0 {
        actions.push(PreviewAction::ZoomWheel(input.wheel));
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_no_actions() {
        assert!(pressed_actions(&InputState::default()).is_empty());
    }

    #[test]
    fn test_just_pressed_keys_become_actions() {
        let mut input = InputState::default();
        input.next_animation.just_pressed = true;
        input.mirror_y.just_pressed = true;
        // Held but not just pressed: no repeat
        input.zoom_in.active = true;
        assert_eq!(
            pressed_actions(&input),
            vec![PreviewAction::NextAnimation, PreviewAction::ToggleMirrorY]
        );
    }

    #[test]
    fn test_wheel_becomes_zoom_action() {
        let mut input = InputState::default();
        input.wheel = -2.0;
        assert_eq!(pressed_actions(&input), vec![PreviewAction::ZoomWheel(-2.0)]);
    }

    #[test]
    fn test_debug_key_is_not_a_preview_action() {
        let mut input = InputState::default();
        input.mode_debug.just_pressed = true;
        assert!(pressed_actions(&input).is_empty());
    }
}
