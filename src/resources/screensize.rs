//! Screen size resource.
//!
//! Stores the current framebuffer dimensions in pixels. The preview is always
//! centered on the screen, so the render system reads this every frame.

use bevy_ecs::prelude::Resource;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
