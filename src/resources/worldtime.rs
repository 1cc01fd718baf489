//! Preview clock resource.
//!
//! Holds the monotonic time read from raylib at the start of each frame.
//! The playback clock consumes [`WorldTime::now_ms`]; nothing in the preview
//! assumes a fixed frame rate.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldTime {
    /// Monotonic time since startup in milliseconds.
    pub now_ms: f64,
}
