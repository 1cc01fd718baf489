//! Asset loading.
//!
//! [`load_asset_observer`] handles [`LoadAssetEvent`]s. Every load either
//! replaces the matching resource wholesale or, on failure, logs the error
//! and leaves the previously loaded asset untouched.
//!
//! - Texture: decoded by raylib into the non-send [`SheetTexture`].
//! - Atlas: parsed into [`Atlas`]. If no texture is loaded yet and the
//!   document names one (`imagePath`), that image is loaded as well.
//! - Manifest: parsed into [`AnimationManifest`]; playback takes over its fps
//!   and selects its first animation.
use std::path::{Path, PathBuf};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::prelude::Texture2D;

use crate::error::LoadError;
use crate::events::loadasset::{AssetKind, LoadAssetEvent};
use crate::resources::atlas::Atlas;
use crate::resources::manifest::AnimationManifest;
use crate::resources::playback::PlaybackState;
use crate::resources::sheettexture::SheetTexture;

/// Observer that loads the requested file into the matching resource.
pub fn load_asset_observer(
    trigger: On<LoadAssetEvent>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut sheet: NonSendMut<SheetTexture>,
    mut atlas: ResMut<Atlas>,
    mut manifest: ResMut<AnimationManifest>,
    mut playback: ResMut<PlaybackState>,
) {
    let event = trigger.event();
    let path = event.path.as_path();

    let Some(kind) = event.resolved_kind() else {
        error!("{}", LoadError::Unsupported(path.to_path_buf()));
        return;
    };

    let result = match kind {
        AssetKind::Texture => {
            load_texture(&mut rl, &th, path).map(|texture| sheet.replace(texture))
        }
        AssetKind::Atlas => apply_atlas_file(path, &mut atlas).map(|companion| {
            let Some(image) = companion else {
                return;
            };
            if sheet.is_loaded() {
                return;
            }
            info!("Atlas names texture {:?}, loading it", image);
            match load_texture(&mut rl, &th, &image) {
                Ok(texture) => sheet.replace(texture),
                Err(err) => error!("{}", err),
            }
        }),
        AssetKind::Manifest => apply_manifest_file(path, &mut manifest, &mut playback),
    };

    if let Err(err) = result {
        error!("{}", err);
    }
}

fn load_texture(
    rl: &mut raylib::RaylibHandle,
    th: &raylib::RaylibThread,
    path: &Path,
) -> Result<Texture2D, LoadError> {
    let texture_error = |reason: String| LoadError::Texture {
        path: path.to_path_buf(),
        reason,
    };
    let filename = path
        .to_str()
        .ok_or_else(|| texture_error("path is not valid UTF-8".to_string()))?;
    let texture = rl
        .load_texture(th, filename)
        .map_err(|err| texture_error(err.to_string()))?;
    info!(
        "Loaded texture {:?}: {}x{}",
        path, texture.width, texture.height
    );
    Ok(texture)
}

/// Parse an atlas file and replace `atlas` with it.
///
/// Returns the texture path the document names, resolved next to the file.
/// On error `atlas` is left unchanged.
pub fn apply_atlas_file(path: &Path, atlas: &mut Atlas) -> Result<Option<PathBuf>, LoadError> {
    let loaded = Atlas::load_from_file(path)?;
    let companion = loaded.companion_texture(path);
    *atlas = loaded;
    Ok(companion)
}

/// Parse a manifest file, replace `manifest` with it and point playback at it.
///
/// On error neither `manifest` nor `playback` is touched.
pub fn apply_manifest_file(
    path: &Path,
    manifest: &mut AnimationManifest,
    playback: &mut PlaybackState,
) -> Result<(), LoadError> {
    let loaded = AnimationManifest::load_from_file(path)?;
    playback.apply_manifest(&loaded);
    *manifest = loaded;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_apply_atlas_file_replaces_atlas() {
        let file = temp_file(
            ".xml",
            r#"<TextureAtlas imagePath="sheet.png"><SubTexture name="a_0" x="0" y="0" width="4" height="4"/></TextureAtlas>"#,
        );
        let mut atlas = Atlas::new(vec![]);
        let companion = apply_atlas_file(file.path(), &mut atlas).unwrap();
        assert_eq!(atlas.len(), 1);
        let dir = file.path().parent().unwrap();
        assert_eq!(companion, Some(dir.join("sheet.png")));
    }

    #[test]
    fn test_broken_atlas_keeps_previous() {
        let file = temp_file(".xml", "<TextureAtlas><SubTexture></TextureAtlas>");
        let previous = Atlas::new(vec![crate::resources::atlas::FrameRegion::new(
            "keep", 0, 0, 1, 1,
        )]);
        let mut atlas = previous.clone();
        assert!(apply_atlas_file(file.path(), &mut atlas).is_err());
        assert_eq!(atlas, previous);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut atlas = Atlas::default();
        let result = apply_atlas_file(Path::new("/definitely/not/here.xml"), &mut atlas);
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_apply_manifest_file_selects_first_animation() {
        let file = temp_file(
            ".json",
            r#"{"animations":[{"anim":"idle","fps":10},{"anim":"run"}]}"#,
        );
        let mut manifest = AnimationManifest::default();
        let mut playback = PlaybackState::default();
        playback.frame_index = 3;

        apply_manifest_file(file.path(), &mut manifest, &mut playback).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(playback.current_anim_id.as_deref(), Some("idle"));
        assert_eq!(playback.frame_index, 0);
        assert_eq!(playback.target_fps, 10.0);
    }

    #[test]
    fn test_string_fps_reaches_playback() {
        let file = temp_file(".json", r#"{"animations":[{"anim":"idle","fps":"12"}]}"#);
        let mut manifest = AnimationManifest::default();
        let mut playback = PlaybackState::default();

        apply_manifest_file(file.path(), &mut manifest, &mut playback).unwrap();
        assert_eq!(manifest.fps, 12.0);
        assert_eq!(playback.target_fps, 12.0);
    }

    #[test]
    fn test_broken_manifest_keeps_state() {
        let file = temp_file(".json", "{ not json");
        let mut manifest = AnimationManifest::default();
        let mut playback = PlaybackState::default();
        playback.select_animation(Some("walk"));
        let before = playback.clone();

        assert!(apply_manifest_file(file.path(), &mut manifest, &mut playback).is_err());
        assert!(manifest.is_empty());
        assert_eq!(playback, before);
    }
}
