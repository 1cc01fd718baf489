//! Load errors.
//!
//! The preview core never fails: malformed numbers coerce and missing data
//! skips a draw. The only failures are on the loading side (unreadable files,
//! broken XML/JSON syntax, undecodable images), and they are reported through
//! [`LoadError`]. Loaders log the error and keep the previously loaded asset.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading a texture, atlas or manifest from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed atlas document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("malformed animation manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to load texture {}: {reason}", path.display())]
    Texture { path: PathBuf, reason: String },

    #[error("unsupported file type: {}", .0.display())]
    Unsupported(PathBuf),
}

/// Read a whole text file, tagging I/O failures with the path.
pub fn read_text(path: impl Into<PathBuf>) -> Result<String, LoadError> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
}
