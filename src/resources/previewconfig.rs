//! Preview configuration resource.
//!
//! Window and playback defaults loaded from an INI configuration file.
//! Missing files or keys keep the built-in defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 960
//! height = 720
//! target_fps = 60
//! vsync = true
//!
//! [preview]
//! fps = 24
//! zoom = 1.0
//! zoom_step = 0.1
//! zoom_min = 0.1
//! zoom_max = 8.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 960;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_PLAYBACK_FPS: f32 = 24.0;
const DEFAULT_ZOOM: f32 = 1.0;
const DEFAULT_ZOOM_STEP: f32 = 0.1;
const DEFAULT_ZOOM_MIN: f32 = 0.1;
const DEFAULT_ZOOM_MAX: f32 = 8.0;
pub const DEFAULT_CONFIG_PATH: &str = "./sheetview.ini";

/// Preview configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Display refresh cap. Independent of the animation frame rate.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Initial animation frame rate, overridden by a loaded manifest.
    pub playback_fps: f32,
    /// Initial zoom factor.
    pub zoom: f32,
    /// Zoom change per key press or wheel notch.
    pub zoom_step: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            playback_fps: DEFAULT_PLAYBACK_FPS,
            zoom: DEFAULT_ZOOM,
            zoom_step: DEFAULT_ZOOM_STEP,
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing or non-positive values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [preview] section
        let positive = |key: &str| {
            config
                .getfloat("preview", key)
                .ok()
                .flatten()
                .map(|v| v as f32)
                .filter(|v| v.is_finite() && *v > 0.0)
        };
        if let Some(fps) = positive("fps") {
            self.playback_fps = fps;
        }
        if let Some(zoom) = positive("zoom") {
            self.zoom = zoom;
        }
        if let Some(step) = positive("zoom_step") {
            self.zoom_step = step;
        }
        if let Some(min) = positive("zoom_min") {
            self.zoom_min = min;
        }
        if let Some(max) = positive("zoom_max") {
            self.zoom_max = max;
        }
        if self.zoom_min > self.zoom_max {
            warn!(
                "zoom_min {} is above zoom_max {}, swapping",
                self.zoom_min, self.zoom_max
            );
            std::mem::swap(&mut self.zoom_min, &mut self.zoom_max);
        }
        self.zoom = self.zoom.clamp(self.zoom_min, self.zoom_max);

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, playback {} fps, zoom {} [{}..{}] step {}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.playback_fps,
            self.zoom,
            self.zoom_min,
            self.zoom_max,
            self.zoom_step
        );

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = PreviewConfig::new();
        assert_eq!(config.window_size(), (960, 720));
        assert_eq!(config.target_fps, 60);
        assert!(config.vsync);
        assert_eq!(config.playback_fps, 24.0);
        assert_eq!(config.zoom, 1.0);
    }

    #[test]
    fn test_missing_file_is_an_error_and_keeps_defaults() {
        let mut config = PreviewConfig::with_path("/nonexistent/sheetview.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.window_size(), (960, 720));
    }

    #[test]
    fn test_load_overrides_present_keys() {
        let file = write_config(
            "[window]\nwidth = 640\nvsync = false\n\n[preview]\nfps = 12\nzoom = 2.5\n",
        );
        let mut config = PreviewConfig::with_path(file.path());
        config.load_from_file().unwrap();
        assert_eq!(config.window_size(), (640, 720));
        assert!(!config.vsync);
        assert_eq!(config.playback_fps, 12.0);
        assert_eq!(config.zoom, 2.5);
        assert_eq!(config.zoom_step, 0.1);
    }

    #[test]
    fn test_load_ignores_invalid_values() {
        let file = write_config("[preview]\nfps = -3\nzoom = abc\nzoom_step = 0\n");
        let mut config = PreviewConfig::with_path(file.path());
        config.load_from_file().unwrap();
        assert_eq!(config.playback_fps, 24.0);
        assert_eq!(config.zoom, 1.0);
        assert_eq!(config.zoom_step, 0.1);
    }

    #[test]
    fn test_initial_zoom_is_clamped_to_range() {
        let file = write_config("[preview]\nzoom = 20\nzoom_min = 4\nzoom_max = 0.5\n");
        let mut config = PreviewConfig::with_path(file.path());
        config.load_from_file().unwrap();
        assert_eq!(config.zoom_min, 0.5);
        assert_eq!(config.zoom_max, 4.0);
        assert_eq!(config.zoom, 4.0);
    }
}
