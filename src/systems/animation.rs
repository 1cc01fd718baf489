//! Frame resolution for animations.
//!
//! [`resolve_frames`] turns an animation's source prefix into the ordered
//! list of atlas regions that make up the animation. It is recomputed on
//! every render tick, so loading a new atlas takes effect immediately.
//!
//! # Ordering
//!
//! Frames are ordered by the number embedded in their name: every non-digit
//! character is dropped and the remaining digits are read as one integer
//! (`"walk_10"` is 10, `"a1b2"` is 12, `"idle"` is 0). The sort is stable, so
//! names with equal numbers keep their atlas order.
//!
//! # Related
//!
//! - [`crate::resources::atlas::Atlas`] – source of the regions
//! - [`crate::resources::manifest::AnimationSpec`] – provides the source prefix

use crate::resources::atlas::FrameRegion;

/// Collect the regions whose name starts with `source_prefix`, ordered by frame number.
///
/// The match is exact and case-sensitive. An empty result means there is
/// nothing to draw; it is not an error.
pub fn resolve_frames<'a>(source_prefix: &str, regions: &'a [FrameRegion]) -> Vec<&'a FrameRegion> {
    let mut frames: Vec<&FrameRegion> = regions
        .iter()
        .filter(|region| region.name.starts_with(source_prefix))
        .collect();
    frames.sort_by_key(|region| frame_number(&region.name));
    frames
}

/// Numeric sort key of a frame name. Saturates instead of overflowing.
pub fn frame_number(name: &str) -> u64 {
    name.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(digit as u64)
        })
}
