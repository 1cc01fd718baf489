//! Preview systems.
//!
//! Submodules overview
//! - [`animation`] – collect and order the frames of one animation
//! - [`control`] – apply preview controls to the playback state
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`loader`] – load textures, atlases and manifests on request
//! - [`render`] – per-frame tick: clock, frame geometry and drawing with Raylib
//! - [`time`] – update monotonic preview time

pub mod animation;
pub mod control;
pub mod input;
pub mod loader;
pub mod render;
pub mod time;
