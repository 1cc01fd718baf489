//! Preview control observer.
//!
//! Applies [`ControlEvent`]s to the [`PlaybackState`] resource. Zoom steps
//! and limits come from the [`PreviewConfig`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::events::control::{ControlEvent, PreviewAction};
use crate::resources::manifest::AnimationManifest;
use crate::resources::playback::PlaybackState;
use crate::resources::previewconfig::PreviewConfig;

/// Observer that maps a [`PreviewAction`] onto the playback state.
pub fn playback_control_observer(
    trigger: On<ControlEvent>,
    mut playback: ResMut<PlaybackState>,
    manifest: Res<AnimationManifest>,
    config: Res<PreviewConfig>,
) {
    let action = trigger.event().action;
    debug!("Preview action {:?}", action);
    apply_action(&mut playback, &manifest, &config, action);
}

/// Apply one action. Split from the observer so it can be reused outside the world.
pub fn apply_action(
    playback: &mut PlaybackState,
    manifest: &AnimationManifest,
    config: &PreviewConfig,
    action: PreviewAction,
) {
    let (min, max, step) = (config.zoom_min, config.zoom_max, config.zoom_step);
    match action {
        PreviewAction::PreviousAnimation => {
            playback.cycle_animation(manifest, -1);
        }
        PreviewAction::NextAnimation => {
            playback.cycle_animation(manifest, 1);
        }
        PreviewAction::ZoomIn => playback.zoom_by(step, min, max),
        PreviewAction::ZoomOut => playback.zoom_by(-step, min, max),
        PreviewAction::ZoomWheel(notches) => playback.zoom_by(notches * step, min, max),
        PreviewAction::ResetZoom => {
            playback.set_zoom(config.zoom);
        }
        PreviewAction::FpsUp => playback.step_fps(1.0),
        PreviewAction::FpsDown => playback.step_fps(-1.0),
        PreviewAction::ToggleMirrorX => playback.toggle_mirror_x(),
        PreviewAction::ToggleMirrorY => playback.toggle_mirror_y(),
    }
}
