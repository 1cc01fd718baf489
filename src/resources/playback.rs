//! Playback and view state of the preview session.
//!
//! A single [`PlaybackState`] resource lives for the whole session. It holds
//! the playback clock (current frame index and time of the last advance) and
//! the user-controlled view parameters (frame rate, zoom, mirroring).
//!
//! # Clock rule
//!
//! [`PlaybackState::advance`] is a fixed-threshold accumulator: when more
//! than one frame interval has passed since the last advance, the index moves
//! forward by exactly one frame (wrapping) and the advance time is reset to
//! `now`. Late ticks never skip frames.
//!
//! Selecting another animation resets the frame index to 0 but keeps the
//! last advance time, so the first frame of the new animation may be shown
//! for less than a full interval.

use bevy_ecs::prelude::Resource;
use log::{debug, info};

use crate::resources::manifest::{AnimationManifest, DEFAULT_FPS};

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_anim_id: Option<String>,
    pub frame_index: usize,
    /// Monotonic time of the last frame advance, in milliseconds.
    pub last_advance_ms: f64,
    pub target_fps: f32,
    pub zoom: f32,
    pub mirror_x: bool,
    pub mirror_y: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(DEFAULT_FPS, 1.0)
    }
}

impl PlaybackState {
    /// Fresh state with no selection. Invalid values fall back to 24 fps / 1x zoom.
    pub fn new(fps: f32, zoom: f32) -> Self {
        Self {
            current_anim_id: None,
            frame_index: 0,
            last_advance_ms: 0.0,
            target_fps: if is_positive(fps) { fps } else { DEFAULT_FPS },
            zoom: if is_positive(zoom) { zoom } else { 1.0 },
            mirror_x: false,
            mirror_y: false,
        }
    }

    /// Advance the clock and return the frame index to display.
    ///
    /// With `frame_count == 0` nothing changes.
    pub fn advance(&mut self, now_ms: f64, frame_count: usize, fps: f32) -> usize {
        if frame_count == 0 {
            return self.frame_index;
        }

        let interval_ms = 1000.0 / fps as f64;
        if now_ms - self.last_advance_ms > interval_ms {
            self.frame_index = (self.frame_index + 1) % frame_count;
            self.last_advance_ms = now_ms;
        }
        self.frame_index
    }

    /// Select an animation by id, or clear the selection.
    ///
    /// Returns true if the selection changed (and the frame index was reset).
    pub fn select_animation(&mut self, anim_id: Option<&str>) -> bool {
        if self.current_anim_id.as_deref() == anim_id {
            return false;
        }
        self.current_anim_id = anim_id.map(str::to_owned);
        self.frame_index = 0;
        info!("Selected animation {:?}", self.current_anim_id);
        true
    }

    /// Move the selection `step` entries through the manifest, wrapping at both ends.
    ///
    /// Without a valid current selection the first animation is selected.
    pub fn cycle_animation(&mut self, manifest: &AnimationManifest, step: isize) -> bool {
        let count = manifest.len();
        if count == 0 {
            return false;
        }

        let target = match self
            .current_anim_id
            .as_deref()
            .and_then(|id| manifest.position(id))
        {
            Some(current) => (current as isize + step).rem_euclid(count as isize) as usize,
            None => 0,
        };
        let anim_id = manifest.animations()[target].anim_id.clone();
        self.select_animation(Some(&anim_id))
    }

    /// Take over a freshly loaded manifest: its global fps and its first animation.
    pub fn apply_manifest(&mut self, manifest: &AnimationManifest) {
        self.set_fps(manifest.fps);
        let first = manifest.first().map(|spec| spec.anim_id.clone());
        self.select_animation(first.as_deref());
    }

    /// Set the playback rate. Non-positive values are rejected.
    pub fn set_fps(&mut self, fps: f32) -> bool {
        if !is_positive(fps) {
            return false;
        }
        self.target_fps = fps;
        debug!("Playback fps set to {}", fps);
        true
    }

    /// Set the playback rate from user text.
    ///
    /// The leading integer of the text is used; anything that does not yield
    /// a positive integer selects the default of 24.
    pub fn set_fps_from_text(&mut self, text: &str) {
        let fps = leading_integer(text)
            .filter(|fps| *fps > 0)
            .map(|fps| fps as f32)
            .unwrap_or(DEFAULT_FPS);
        self.set_fps(fps);
    }

    /// Change the rate by whole frames, never going below 1 fps.
    pub fn step_fps(&mut self, delta: f32) {
        let fps = (self.target_fps + delta).max(1.0);
        self.set_fps(fps);
    }

    /// Set the zoom factor. Non-positive or non-finite values are rejected.
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        if !is_positive(zoom) {
            return false;
        }
        self.zoom = zoom;
        true
    }

    /// Add `delta` to the zoom factor, clamped to `[min, max]`.
    pub fn zoom_by(&mut self, delta: f32, min: f32, max: f32) {
        let zoom = (self.zoom + delta).clamp(min, max);
        self.set_zoom(zoom);
    }

    pub fn toggle_mirror_x(&mut self) {
        self.mirror_x = !self.mirror_x;
    }

    pub fn toggle_mirror_y(&mut self) {
        self.mirror_y = !self.mirror_y;
    }

    /// One-line summary for the on-screen status bar.
    pub fn status_line(&self) -> String {
        let anim = self.current_anim_id.as_deref().unwrap_or("-");
        let mut line = format!(
            "{} | {} fps | {:.1}x",
            anim, self.target_fps, self.zoom
        );
        if self.mirror_x {
            line.push_str(" | mirror X");
        }
        if self.mirror_y {
            line.push_str(" | mirror Y");
        }
        line
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}
