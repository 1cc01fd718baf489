//! Debug toggle resource.
//!
//! The mere presence of this resource enables the frame details overlay.
//! Remove it to hide the overlay.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the render system draws frame diagnostics.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
