//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: loaded assets, playback state,
//! input, timing and configuration.
//!
//! Overview
//! - `atlas` – frame regions parsed from the Sparrow XML document
//! - `debugmode` – presence toggles the debug overlay
//! - `input` – per-frame keyboard and wheel state of the preview controls
//! - `manifest` – animations and global fps from the JSON manifest
//! - `playback` – selection, frame clock, zoom and mirroring
//! - `previewconfig` – window and preview defaults from the INI file
//! - `screensize` – current framebuffer dimensions in pixels
//! - `sheettexture` – the loaded sprite sheet (non-send)
//! - `worldtime` – monotonic preview time
pub mod atlas;
pub mod debugmode;
pub mod input;
pub mod manifest;
pub mod playback;
pub mod previewconfig;
pub mod screensize;
pub mod sheettexture;
pub mod worldtime;
