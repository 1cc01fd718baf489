//! Texture atlas resource.
//!
//! Parses a Sparrow-style region document into addressable [`FrameRegion`]s:
//!
//! ```xml
//! <TextureAtlas imagePath="hero.png">
//!     <SubTexture name="walk_01" x="0" y="0" width="30" height="40"
//!                 frameX="-2" frameY="-1" frameWidth="34" frameHeight="42"/>
//! </TextureAtlas>
//! ```
//!
//! Parsing is permissive: a missing or malformed required number becomes `0`,
//! a missing or malformed optional one falls back to its default. Only broken
//! XML syntax is an error.
//!
//! # Related
//!
//! - [`crate::systems::animation::resolve_frames`] – selects and orders frames of one animation
//! - [`crate::systems::render::compute_draw`] – turns a frame into draw rectangles

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use log::{info, warn};

use crate::error::{LoadError, read_text};

const SUB_TEXTURE_TAG: &str = "SubTexture";

/// One named sub-rectangle of the packed texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRegion {
    pub name: String,
    /// Source rectangle (trimmed bounds) within the texture.
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    /// Offset of the trimmed rectangle inside the untrimmed frame box.
    pub frame_x: i32,
    pub frame_y: i32,
    /// Size of the untrimmed frame box. Defaults to `w`/`h`.
    pub frame_w: u32,
    pub frame_h: u32,
}

impl FrameRegion {
    /// Untrimmed region covering `w`x`h` at (`x`, `y`).
    pub fn new(name: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            w,
            h,
            frame_x: 0,
            frame_y: 0,
            frame_w: w,
            frame_h: h,
        }
    }

    /// Builder-style setter for the trim offset and the untrimmed size.
    pub fn with_frame(mut self, frame_x: i32, frame_y: i32, frame_w: u32, frame_h: u32) -> Self {
        self.frame_x = frame_x;
        self.frame_y = frame_y;
        self.frame_w = frame_w;
        self.frame_h = frame_h;
        self
    }
}

/// All frame regions of the currently loaded atlas.
///
/// Replaced wholesale on every load; never updated in place.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Atlas {
    /// Regions in document order.
    pub regions: Vec<FrameRegion>,
    /// `imagePath` of the root element, if the document names its texture.
    pub image_path: Option<String>,
}

impl Atlas {
    pub fn new(regions: Vec<FrameRegion>) -> Self {
        Self {
            regions,
            image_path: None,
        }
    }

    /// Parse a region document.
    ///
    /// Every `SubTexture` element yields exactly one region, whatever its
    /// attributes look like.
    pub fn parse(document: &str) -> Result<Self, LoadError> {
        let doc = roxmltree::Document::parse(document)?;

        let image_path = doc
            .root_element()
            .attribute("imagePath")
            .filter(|p| !p.trim().is_empty())
            .map(str::to_owned);

        let regions = doc
            .descendants()
            .filter(|node| node.has_tag_name(SUB_TEXTURE_TAG))
            .enumerate()
            .map(|(index, node)| region_from_node(index, &node))
            .collect();

        Ok(Self {
            regions,
            image_path,
        })
    }

    /// Read and parse a region document from disk.
    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        let text = read_text(path)?;
        let atlas = Self::parse(&text)?;
        info!(
            "Loaded atlas {:?}: {} regions",
            path,
            atlas.regions.len()
        );
        Ok(atlas)
    }

    /// Texture path named by the document, resolved against the atlas file's directory.
    pub fn companion_texture(&self, atlas_path: &Path) -> Option<PathBuf> {
        let image = self.image_path.as_deref()?;
        let dir = atlas_path.parent().unwrap_or_else(|| Path::new(""));
        Some(dir.join(image))
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }
}

fn region_from_node(index: usize, node: &roxmltree::Node) -> FrameRegion {
    let name = match node.attribute("name") {
        Some(name) => name.to_owned(),
        None => {
            warn!("SubTexture #{} has no name attribute", index);
            String::new()
        }
    };

    let w = required_u32(node, "width");
    let h = required_u32(node, "height");

    FrameRegion {
        name,
        x: required_u32(node, "x"),
        y: required_u32(node, "y"),
        w,
        h,
        frame_x: optional_i32(node, "frameX").unwrap_or(0),
        frame_y: optional_i32(node, "frameY").unwrap_or(0),
        frame_w: optional_u32(node, "frameWidth").unwrap_or(w),
        frame_h: optional_u32(node, "frameHeight").unwrap_or(h),
    }
}

/// Parse an integer attribute value. Decimals are truncated toward zero.
fn parse_number(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    })
}

fn optional_u32(node: &roxmltree::Node, attr: &str) -> Option<u32> {
    node.attribute(attr)
        .and_then(parse_number)
        .and_then(|v| u32::try_from(v).ok())
}

fn optional_i32(node: &roxmltree::Node, attr: &str) -> Option<i32> {
    node.attribute(attr)
        .and_then(parse_number)
        .and_then(|v| i32::try_from(v).ok())
}

fn required_u32(node: &roxmltree::Node, attr: &str) -> u32 {
    optional_u32(node, attr).unwrap_or(0)
}
