//! Sprite sheet texture resource.
//!
//! A non-send resource holding the packed texture currently being previewed.
//! The texture is only ever read through source-rectangle crops; loading a
//! new image replaces the previous one wholesale.
//!
//! Note: This is a non-send resource because raylib textures must be accessed
//! from the main thread only.

use raylib::prelude::Texture2D;

/// The loaded sprite sheet, if any.
///
/// This is a non-send resource; use `NonSend<SheetTexture>` in system parameters.
#[derive(Default)]
pub struct SheetTexture {
    texture: Option<Texture2D>,
}

impl SheetTexture {
    /// Create an empty texture slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current texture.
    pub fn replace(&mut self, texture: Texture2D) {
        self.texture = Some(texture);
    }

    pub fn get(&self) -> Option<&Texture2D> {
        self.texture.as_ref()
    }

    /// Intrinsic pixel size of the loaded texture.
    pub fn size(&self) -> Option<(i32, i32)> {
        self.texture.as_ref().map(|t| (t.width, t.height))
    }

    pub fn is_loaded(&self) -> bool {
        self.texture.is_some()
    }
}
