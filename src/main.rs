//! Sheetview main entry point.
//!
//! A sprite sheet animation previewer written in Rust using:
//! - **raylib** for windowing, texture decoding and drawing
//! - **bevy_ecs** for resources, observers and the per-frame schedule
//!
//! # Main Loop
//!
//! 1. Read `sheetview.ini` and open the window
//! 2. Insert resources (playback state, atlas, manifest, input, time)
//! 3. Register observers and load the files given on the command line
//! 4. Every frame:
//!    - Update time and screen size
//!    - Poll input (keys, wheel, dropped files), which triggers control and load events
//!    - Render: advance the frame clock and draw the current frame
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --atlas hero.xml --manifest hero.json
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;

use sheetview::events::loadasset::{AssetKind, LoadAssetEvent};
use sheetview::events::switchdebug::switch_debug_observer;
use sheetview::resources::atlas::Atlas;
use sheetview::resources::input::InputState;
use sheetview::resources::manifest::AnimationManifest;
use sheetview::resources::playback::PlaybackState;
use sheetview::resources::previewconfig::{DEFAULT_CONFIG_PATH, PreviewConfig};
use sheetview::resources::screensize::ScreenSize;
use sheetview::resources::sheettexture::SheetTexture;
use sheetview::resources::worldtime::WorldTime;
use sheetview::systems::control::playback_control_observer;
use sheetview::systems::input::update_input_state;
use sheetview::systems::loader::load_asset_observer;
use sheetview::systems::render::render_system;
use sheetview::systems::time::update_world_time;

/// Sprite sheet animation previewer
#[derive(Parser)]
#[command(
    version,
    about = "Preview sprite sheet animations from a texture atlas and an animation manifest."
)]
struct Cli {
    /// Sprite sheet image (PNG, JPG, BMP, ...).
    #[arg(long, value_name = "PATH")]
    texture: Option<PathBuf>,

    /// Sparrow XML atlas describing the frame regions.
    #[arg(long, value_name = "PATH")]
    atlas: Option<PathBuf>,

    /// JSON animation manifest.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Frame rate override, applied after the manifest is loaded.
    /// Anything that is not a positive integer selects 24.
    #[arg(long, value_name = "FPS")]
    fps: Option<String>,

    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = PreviewConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("Using default configuration: {}", e);
    }

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("sheetview");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(InputState::default());
    world.insert_resource(PlaybackState::new(config.playback_fps, config.zoom));
    world.insert_resource(Atlas::default());
    world.insert_resource(AnimationManifest::default());
    world.insert_resource(config);
    world.insert_non_send_resource(SheetTexture::new());
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(playback_control_observer));
    world.spawn(Observer::new(load_asset_observer));
    // Observers must exist before the first event is triggered.
    world.flush();

    // Texture first so an atlas naming its own image does not override it.
    let requested = [
        (cli.texture, AssetKind::Texture),
        (cli.atlas, AssetKind::Atlas),
        (cli.manifest, AssetKind::Manifest),
    ];
    for (path, kind) in requested {
        if let Some(path) = path {
            world.trigger(LoadAssetEvent::with_kind(path, kind));
        }
    }
    world.flush();

    if let Some(text) = cli.fps.as_deref() {
        world.resource_mut::<PlaybackState>().set_fps_from_text(text);
    }

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(render_system.after(update_input_state));

    if let Err(e) = update.initialize(&mut world) {
        log::error!("Failed to initialize schedule: {}", e);
        return;
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let (now, w, h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_time(), rl.get_screen_width(), rl.get_screen_height())
        };
        update_world_time(&mut world, now);
        {
            let mut screen = world.resource_mut::<ScreenSize>();
            screen.w = w;
            screen.h = h;
        }

        update.run(&mut world);

        world.clear_trackers();
    }
    log::info!("Bye");
}
