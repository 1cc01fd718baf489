//! Animation manifest resource.
//!
//! The manifest groups atlas frames into named animations:
//!
//! ```json
//! {
//!   "animations": [
//!     { "anim": "idle", "name": "hero idle", "fps": 12 },
//!     { "anim": "run" }
//!   ]
//! }
//! ```
//!
//! `anim` is the selector key shown to the user; `name` is the frame-name
//! prefix looked up in the atlas and falls back to `anim`. Only the first
//! entry's `fps` is read (a number or a numeric string), and it applies to
//! every animation.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::{LoadError, read_text};

/// Playback speed used when the manifest does not provide a usable one.
pub const DEFAULT_FPS: f32 = 24.0;

#[derive(Debug, Default, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    animations: Vec<AnimationEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct AnimationEntry {
    #[serde(default)]
    anim: String,
    #[serde(default)]
    name: Option<String>,
    // Kept loose so that a string or null fps degrades to the default
    #[serde(default)]
    fps: Option<serde_json::Value>,
}

/// One selectable animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSpec {
    /// Selector key, unique within the manifest.
    pub anim_id: String,
    /// Atlas name prefix used to collect the frames.
    pub source_prefix: String,
}

impl AnimationSpec {
    pub fn new(anim_id: impl Into<String>, source_prefix: Option<String>) -> Self {
        let anim_id = anim_id.into();
        let source_prefix = source_prefix
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or_else(|| anim_id.clone());
        Self {
            anim_id,
            source_prefix,
        }
    }
}

/// Animations of the currently loaded manifest plus the global playback speed.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AnimationManifest {
    animations: Vec<AnimationSpec>,
    index: FxHashMap<String, usize>,
    /// Frames per second, taken from the first animation entry.
    pub fps: f32,
}

impl Default for AnimationManifest {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_FPS)
    }
}

impl AnimationManifest {
    /// Build a manifest; on duplicate ids the first entry wins the lookup.
    pub fn new(animations: Vec<AnimationSpec>, fps: f32) -> Self {
        let mut index = FxHashMap::default();
        for (i, spec) in animations.iter().enumerate() {
            if index.contains_key(&spec.anim_id) {
                warn!("Duplicate animation id '{}' in manifest", spec.anim_id);
                continue;
            }
            index.insert(spec.anim_id.clone(), i);
        }
        Self {
            animations,
            index,
            fps,
        }
    }

    /// Parse a manifest document.
    pub fn parse(json: &str) -> Result<Self, LoadError> {
        let file: ManifestFile = serde_json::from_str(json)?;

        let fps = file
            .animations
            .first()
            .and_then(|entry| entry.fps.as_ref())
            .and_then(fps_value)
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .unwrap_or(DEFAULT_FPS);

        let animations = file
            .animations
            .into_iter()
            .filter_map(|entry| {
                if entry.anim.is_empty() {
                    warn!("Skipping manifest entry without an 'anim' id");
                    return None;
                }
                Some(AnimationSpec::new(entry.anim, entry.name))
            })
            .collect();

        Ok(Self::new(animations, fps))
    }

    /// Read and parse a manifest from disk.
    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        let text = read_text(path)?;
        let manifest = Self::parse(&text)?;
        info!(
            "Loaded manifest {:?}: {} animations at {} fps",
            path,
            manifest.len(),
            manifest.fps
        );
        Ok(manifest)
    }

    pub fn get(&self, anim_id: &str) -> Option<&AnimationSpec> {
        self.index.get(anim_id).map(|&i| &self.animations[i])
    }

    pub fn position(&self, anim_id: &str) -> Option<usize> {
        self.index.get(anim_id).copied()
    }

    pub fn first(&self) -> Option<&AnimationSpec> {
        self.animations.first()
    }

    pub fn animations(&self) -> &[AnimationSpec] {
        &self.animations
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

/// Numeric fps from a JSON number or a numeric string such as `"12"`.
fn fps_value(value: &serde_json::Value) -> Option<f32> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .map(|fps| fps as f32)
}
