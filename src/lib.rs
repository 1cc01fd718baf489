//! Sheetview library.
//!
//! Sprite sheet animation previewer: parses a texture atlas and an animation
//! manifest, runs a frame clock and draws the current frame. The modules are
//! exposed for integration tests.

pub mod error;
pub mod events;
pub mod resources;
pub mod systems;
