//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame from the host's monotonic clock.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Store the current monotonic time on the `WorldTime` resource.
///
/// `now_seconds` is the time since startup in seconds (raylib's `get_time`).
/// A clock that goes backwards is ignored: time never decreases.
pub fn update_world_time(world: &mut World, now_seconds: f64) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.now_ms = (now_seconds * 1000.0).max(wt.now_ms);
}
