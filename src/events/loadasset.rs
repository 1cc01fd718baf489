//! Asset load requests.
//!
//! A [`LoadAssetEvent`] asks for a file to be loaded into the preview. It is
//! triggered for every path given on the command line and for every file
//! dropped onto the window. The file type is decided by extension, see
//! [`AssetKind::from_path`].
//!
//! # Related
//!
//! - [`crate::systems::loader::load_asset_observer`] – performs the load

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;

/// What a file is loaded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Packed sprite sheet image.
    Texture,
    /// Sparrow XML region document.
    Atlas,
    /// JSON animation manifest.
    Manifest,
}

impl AssetKind {
    /// Classify a path by its (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "bmp" | "gif" | "tga" | "qoi" => Some(AssetKind::Texture),
            "xml" => Some(AssetKind::Atlas),
            "json" => Some(AssetKind::Manifest),
            _ => None,
        }
    }
}

/// Request to load one file.
#[derive(Event, Debug, Clone)]
pub struct LoadAssetEvent {
    pub path: PathBuf,
    /// Explicit kind; `None` means "decide by extension".
    pub kind: Option<AssetKind>,
}

impl LoadAssetEvent {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: None,
        }
    }

    pub fn with_kind(path: impl Into<PathBuf>, kind: AssetKind) -> Self {
        Self {
            path: path.into(),
            kind: Some(kind),
        }
    }

    /// Kind to load the file as, explicit or by extension.
    pub fn resolved_kind(&self) -> Option<AssetKind> {
        self.kind.or_else(|| AssetKind::from_path(&self.path))
    }
}
