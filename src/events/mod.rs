//! Event types and observers.
//!
//! Events decouple the input system from the code that reacts to it.
//!
//! Submodules:
//! - [`control`] – preview control requests (selection, zoom, fps, mirroring)
//! - [`loadasset`] – requests to load a texture, atlas or manifest file
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod control;
pub mod loadasset;
pub mod switchdebug;
