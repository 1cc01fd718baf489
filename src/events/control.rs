//! Preview control events.
//!
//! The input system translates key presses into [`ControlEvent`]s; the
//! [`playback_control_observer`](crate::systems::control::playback_control_observer)
//! applies them to the [`PlaybackState`](crate::resources::playback::PlaybackState).
//! Keeping the mapping in an event lets tests drive the controls without a window.

use bevy_ecs::prelude::*;

/// User-level preview actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewAction {
    /// Select the previous animation in manifest order (default: Left arrow).
    PreviousAnimation,
    /// Select the next animation in manifest order (default: Right arrow).
    NextAnimation,
    /// Zoom in one step (default: Up arrow).
    ZoomIn,
    /// Zoom out one step (default: Down arrow).
    ZoomOut,
    /// Zoom by a number of wheel notches, positive zooms in.
    ZoomWheel(f32),
    /// Back to the configured initial zoom (default: 0).
    ResetZoom,
    /// One more frame per second (default: =/+).
    FpsUp,
    /// One less frame per second (default: -).
    FpsDown,
    /// Toggle horizontal mirroring (default: X).
    ToggleMirrorX,
    /// Toggle vertical mirroring (default: Y).
    ToggleMirrorY,
}

/// Event emitted once per triggered [`PreviewAction`].
#[derive(Event, Debug, Clone, Copy)]
pub struct ControlEvent {
    pub action: PreviewAction,
}
