//! Frame compositing and the per-tick render step.
//!
//! - [`compute_draw`] is the pure compositor: it turns one [`FrameRegion`]
//!   and the view parameters into a [`DrawCommand`].
//! - [`render_tick`] is one iteration of the preview loop against any
//!   [`DrawSurface`]: clear, resolve frames, advance the clock, draw.
//! - [`render_system`] runs `render_tick` on the raylib window every frame.
//!
//! # Coordinate model
//!
//! The transform moves the origin to the center of the surface and scales it
//! by the zoom, negated per mirrored axis. The destination rectangle lives in
//! that local space: the untrimmed frame box is centered on the origin and
//! the trimmed art is placed at its trim offset inside the box.

use bevy_ecs::prelude::*;
use log::trace;
use raylib::prelude::*;

use crate::resources::atlas::{Atlas, FrameRegion};
use crate::resources::debugmode::DebugMode;
use crate::resources::manifest::AnimationManifest;
use crate::resources::playback::PlaybackState;
use crate::resources::screensize::ScreenSize;
use crate::resources::sheettexture::SheetTexture;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::resolve_frames;

const BACKGROUND: Color = Color::new(40, 40, 48, 255);
const TEXT_COLOR: Color = Color::RAYWHITE;
const HELP_TEXT: &str =
    "Left/Right: animation  Up/Down/wheel: zoom  0: reset  +/-: fps  X/Y: mirror  F11: debug";

/// Axis-aligned rectangle in floating point pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Translate-then-scale transform applied to the destination rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    /// Negative when the axis is mirrored.
    pub scale_x: f32,
    pub scale_y: f32,
}

impl DrawTransform {
    /// Map a local rectangle to screen space.
    ///
    /// Returns the screen rectangle with positive extents plus whether the
    /// image has to be flipped horizontally / vertically inside it.
    pub fn to_screen(&self, local: &Rect) -> (Rect, bool, bool) {
        let x0 = self.translate_x + self.scale_x * local.x;
        let x1 = self.translate_x + self.scale_x * (local.x + local.w);
        let y0 = self.translate_y + self.scale_y * local.y;
        let y1 = self.translate_y + self.scale_y * (local.y + local.h);

        let screen = Rect::new(x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs());
        (screen, self.scale_x < 0.0, self.scale_y < 0.0)
    }
}

/// Everything a surface needs to composite one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Crop of the packed texture.
    pub source: Rect,
    /// Placement in the transform's local space.
    pub dest: Rect,
    pub transform: DrawTransform,
}

/// Compute source, destination and transform for one frame.
pub fn compute_draw(
    frame: &FrameRegion,
    zoom: f32,
    mirror_x: bool,
    mirror_y: bool,
    surface_width: f32,
    surface_height: f32,
) -> DrawCommand {
    let source = Rect::new(frame.x as f32, frame.y as f32, frame.w as f32, frame.h as f32);

    let transform = DrawTransform {
        translate_x: surface_width / 2.0,
        translate_y: surface_height / 2.0,
        scale_x: if mirror_x { -zoom } else { zoom },
        scale_y: if mirror_y { -zoom } else { zoom },
    };

    let dest = Rect::new(
        -(frame.frame_w as f32) / 2.0 + frame.frame_x as f32,
        -(frame.frame_h as f32) / 2.0 + frame.frame_y as f32,
        frame.w as f32,
        frame.h as f32,
    );

    DrawCommand {
        source,
        dest,
        transform,
    }
}

/// A 2D surface the preview can draw on.
pub trait DrawSurface {
    type Image;

    /// Surface size in pixels.
    fn size(&self) -> (f32, f32);

    fn clear(&mut self);

    fn draw_image(&mut self, image: &Self::Image, command: &DrawCommand);
}

/// Why a tick drew nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleReason {
    NoImage,
    NoSelection,
    UnknownAnimation,
    NoFrames,
}

/// Result of one render tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Idle(IdleReason),
    Drawn {
        frame_name: String,
        frame_index: usize,
        frame_count: usize,
    },
}

/// One iteration of the preview loop.
///
/// Always clears the surface. Draws exactly one image when a texture is
/// loaded and the selected animation resolves to at least one frame.
pub fn render_tick<S: DrawSurface>(
    now_ms: f64,
    playback: &mut PlaybackState,
    atlas: &Atlas,
    manifest: &AnimationManifest,
    image: Option<&S::Image>,
    surface: &mut S,
) -> TickOutcome {
    surface.clear();

    let Some(image) = image else {
        return TickOutcome::Idle(IdleReason::NoImage);
    };
    let Some(anim_id) = playback.current_anim_id.as_deref() else {
        return TickOutcome::Idle(IdleReason::NoSelection);
    };
    let Some(spec) = manifest.get(anim_id) else {
        trace!("Animation '{}' is not in the manifest", anim_id);
        return TickOutcome::Idle(IdleReason::UnknownAnimation);
    };

    let frames = resolve_frames(&spec.source_prefix, &atlas.regions);
    if frames.is_empty() {
        return TickOutcome::Idle(IdleReason::NoFrames);
    }

    let fps = playback.target_fps;
    let mut index = playback.advance(now_ms, frames.len(), fps);
    if index >= frames.len() {
        // The atlas shrank under a running animation
        index %= frames.len();
        playback.frame_index = index;
    }

    let frame = frames[index];
    let (width, height) = surface.size();
    let command = compute_draw(
        frame,
        playback.zoom,
        playback.mirror_x,
        playback.mirror_y,
        width,
        height,
    );
    surface.draw_image(image, &command);

    TickOutcome::Drawn {
        frame_name: frame.name.clone(),
        frame_index: index,
        frame_count: frames.len(),
    }
}

/// [`DrawSurface`] backed by a raylib drawing handle.
pub struct RaylibSurface<'a, D: RaylibDraw> {
    d: &'a mut D,
    width: f32,
    height: f32,
}

impl<'a, D: RaylibDraw> RaylibSurface<'a, D> {
    pub fn new(d: &'a mut D, width: i32, height: i32) -> Self {
        Self {
            d,
            width: width as f32,
            height: height as f32,
        }
    }
}

impl<D: RaylibDraw> DrawSurface for RaylibSurface<'_, D> {
    type Image = Texture2D;

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.d.clear_background(BACKGROUND);
    }

    fn draw_image(&mut self, image: &Texture2D, command: &DrawCommand) {
        let (screen, flip_x, flip_y) = command.transform.to_screen(&command.dest);

        // Negative source extents make raylib mirror the crop
        let mut src = Rectangle {
            x: command.source.x,
            y: command.source.y,
            width: command.source.w,
            height: command.source.h,
        };
        if flip_x {
            src.width = -src.width;
        }
        if flip_y {
            src.height = -src.height;
        }

        let dest = Rectangle {
            x: screen.x,
            y: screen.y,
            width: screen.w,
            height: screen.h,
        };

        self.d
            .draw_texture_pro(image, src, dest, Vector2 { x: 0.0, y: 0.0 }, 0.0, Color::WHITE);
    }
}

/// Draw the current frame, the status bar and, in debug mode, frame details.
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    texture: NonSend<SheetTexture>,
    mut playback: ResMut<PlaybackState>,
    atlas: Res<Atlas>,
    manifest: Res<AnimationManifest>,
    time: Res<WorldTime>,
    screen: Res<ScreenSize>,
    debug: Option<Res<DebugMode>>,
) {
    let mut d = rl.begin_drawing(&th);

    let outcome = {
        let mut surface = RaylibSurface::new(&mut d, screen.w, screen.h);
        render_tick(
            time.now_ms,
            &mut playback,
            &atlas,
            &manifest,
            texture.get(),
            &mut surface,
        )
    };

    d.draw_text(&playback.status_line(), 10, 10, 20, TEXT_COLOR);
    d.draw_text(HELP_TEXT, 10, screen.h - 20, 10, TEXT_COLOR);

    if debug.is_some() {
        let details = debug_lines(&outcome, &atlas, &manifest, texture.size());
        for (i, line) in details.iter().enumerate() {
            d.draw_text(line, 10, 40 + i as i32 * 14, 10, Color::YELLOW);
        }

        // Surface center, where the untrimmed frame box is anchored
        let (cx, cy) = (screen.w / 2, screen.h / 2);
        d.draw_line(cx - 5, cy, cx + 5, cy, Color::GREEN);
        d.draw_line(cx, cy - 5, cx, cy + 5, Color::GREEN);
    }
}

/// Lines of the debug overlay.
pub fn debug_lines(
    outcome: &TickOutcome,
    atlas: &Atlas,
    manifest: &AnimationManifest,
    texture_size: Option<(i32, i32)>,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);
    lines.push(match outcome {
        TickOutcome::Drawn {
            frame_name,
            frame_index,
            frame_count,
        } => format!("frame {}/{}: {}", frame_index + 1, frame_count, frame_name),
        TickOutcome::Idle(reason) => format!("idle: {:?}", reason),
    });
    lines.push(format!("atlas: {} regions", atlas.len()));
    lines.push(format!("manifest: {} animations", manifest.len()));
    lines.push(match texture_size {
        Some((w, h)) => format!("texture: {}x{}", w, h),
        None => "texture: none".to_string(),
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::manifest::AnimationSpec;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Draw(u32, DrawCommand),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl DrawSurface for RecordingSurface {
        type Image = u32;

        fn size(&self) -> (f32, f32) {
            (200.0, 100.0)
        }

        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn draw_image(&mut self, image: &u32, command: &DrawCommand) {
            self.calls.push(Call::Draw(*image, *command));
        }
    }

    fn atlas() -> Atlas {
        Atlas::new(vec![
            FrameRegion::new("walk_2", 10, 0, 10, 10),
            FrameRegion::new("walk_1", 0, 0, 10, 10),
            FrameRegion::new("idle", 20, 0, 8, 12),
        ])
    }

    fn manifest() -> AnimationManifest {
        AnimationManifest::new(
            vec![
                AnimationSpec::new("walk", Some("walk_".into())),
                AnimationSpec::new("idle", None),
                AnimationSpec::new("jump", None),
            ],
            10.0,
        )
    }

    fn playing(anim: &str) -> PlaybackState {
        let mut state = PlaybackState::new(10.0, 1.0);
        state.select_animation(Some(anim));
        state
    }

    #[test]
    fn test_compute_draw_centers_untrimmed_box() {
        let frame = FrameRegion::new("a", 3, 4, 10, 20).with_frame(5, 0, 20, 20);
        let cmd = compute_draw(&frame, 2.0, false, false, 200.0, 100.0);
        assert_eq!(cmd.source, Rect::new(3.0, 4.0, 10.0, 20.0));
        assert_eq!(cmd.dest, Rect::new(-5.0, -10.0, 10.0, 20.0));
        assert_eq!(cmd.transform.translate_x, 100.0);
        assert_eq!(cmd.transform.translate_y, 50.0);
        assert_eq!((cmd.transform.scale_x, cmd.transform.scale_y), (2.0, 2.0));
    }

    #[test]
    fn test_compute_draw_mirror_negates_one_axis() {
        let frame = FrameRegion::new("a", 0, 0, 16, 16);
        let plain = compute_draw(&frame, 1.5, false, false, 64.0, 64.0);
        let mirrored = compute_draw(&frame, 1.5, true, false, 64.0, 64.0);
        assert_eq!(mirrored.transform.scale_x, -plain.transform.scale_x);
        assert_eq!(mirrored.transform.scale_y, plain.transform.scale_y);
        assert_eq!(mirrored.source, plain.source);
        assert_eq!(mirrored.dest, plain.dest);

        let flipped = compute_draw(&frame, 1.5, false, true, 64.0, 64.0);
        assert_eq!(flipped.transform.scale_y, -1.5);
    }

    #[test]
    fn test_to_screen_without_mirror() {
        let frame = FrameRegion::new("a", 0, 0, 10, 20).with_frame(5, 0, 20, 20);
        let cmd = compute_draw(&frame, 2.0, false, false, 200.0, 100.0);
        let (screen, fx, fy) = cmd.transform.to_screen(&cmd.dest);
        assert_eq!(screen, Rect::new(90.0, 30.0, 20.0, 40.0));
        assert!(!fx && !fy);
    }

    #[test]
    fn test_to_screen_with_mirror_x() {
        let frame = FrameRegion::new("a", 0, 0, 10, 20).with_frame(5, 0, 20, 20);
        let cmd = compute_draw(&frame, 2.0, true, false, 200.0, 100.0);
        let (screen, fx, fy) = cmd.transform.to_screen(&cmd.dest);
        // Local x spans -5..5, mirrored to 5..-5, scaled by 2 around x=100
        assert_eq!(screen, Rect::new(90.0, 30.0, 20.0, 40.0));
        assert!(fx);
        assert!(!fy);
    }

    #[test]
    fn test_to_screen_mirror_moves_trimmed_art() {
        // Art sits in the right half of its untrimmed box
        let frame = FrameRegion::new("a", 0, 0, 10, 10).with_frame(10, 0, 20, 10);
        let plain = compute_draw(&frame, 1.0, false, false, 100.0, 100.0);
        let mirrored = compute_draw(&frame, 1.0, true, true, 100.0, 100.0);
        let (a, _, _) = plain.transform.to_screen(&plain.dest);
        let (b, fx, fy) = mirrored.transform.to_screen(&mirrored.dest);
        assert_eq!(a, Rect::new(50.0, 45.0, 10.0, 10.0));
        assert_eq!(b, Rect::new(40.0, 45.0, 10.0, 10.0));
        assert!(fx && fy);
    }

    #[test]
    fn test_tick_draws_once_after_clear() {
        let mut surface = RecordingSurface::default();
        let mut state = playing("walk");
        let outcome = render_tick(50.0, &mut state, &atlas(), &manifest(), Some(&7), &mut surface);

        assert_eq!(
            outcome,
            TickOutcome::Drawn {
                frame_name: "walk_1".into(),
                frame_index: 0,
                frame_count: 2,
            }
        );
        assert_eq!(surface.calls.len(), 2);
        assert_eq!(surface.calls[0], Call::Clear);
        match &surface.calls[1] {
            Call::Draw(image, cmd) => {
                assert_eq!(*image, 7);
                assert_eq!(cmd.source, Rect::new(0.0, 0.0, 10.0, 10.0));
            }
            other => panic!("expected a draw, got {other:?}"),
        }
    }

    #[test]
    fn test_tick_advances_with_time() {
        let mut surface = RecordingSurface::default();
        let mut state = playing("walk");
        render_tick(50.0, &mut state, &atlas(), &manifest(), Some(&1), &mut surface);
        let outcome = render_tick(150.0, &mut state, &atlas(), &manifest(), Some(&1), &mut surface);
        assert!(matches!(outcome, TickOutcome::Drawn { frame_index: 1, .. }));
        let outcome = render_tick(300.0, &mut state, &atlas(), &manifest(), Some(&1), &mut surface);
        assert!(matches!(outcome, TickOutcome::Drawn { frame_index: 0, .. }));
    }

    #[test]
    fn test_tick_without_frames_only_clears() {
        let mut surface = RecordingSurface::default();
        let mut state = playing("jump");
        let outcome = render_tick(500.0, &mut state, &atlas(), &manifest(), Some(&1), &mut surface);
        assert_eq!(outcome, TickOutcome::Idle(IdleReason::NoFrames));
        assert_eq!(surface.calls, vec![Call::Clear]);
        assert_eq!(state.last_advance_ms, 0.0);
    }

    #[test]
    fn test_tick_without_image_or_selection() {
        let mut surface = RecordingSurface::default();
        let mut state = playing("walk");
        let outcome = render_tick(500.0, &mut state, &atlas(), &manifest(), None, &mut surface);
        assert_eq!(outcome, TickOutcome::Idle(IdleReason::NoImage));

        let mut state = PlaybackState::default();
        let outcome = render_tick(500.0, &mut state, &atlas(), &manifest(), Some(&1), &mut surface);
        assert_eq!(outcome, TickOutcome::Idle(IdleReason::NoSelection));

        let mut state = playing("swim");
        let outcome = render_tick(500.0, &mut state, &atlas(), &manifest(), Some(&1), &mut surface);
        assert_eq!(outcome, TickOutcome::Idle(IdleReason::UnknownAnimation));

        assert_eq!(surface.calls, vec![Call::Clear, Call::Clear, Call::Clear]);
    }

    #[test]
    fn test_tick_wraps_stale_index() {
        let mut surface = RecordingSurface::default();
        let mut state = playing("walk");
        state.frame_index = 5;
        state.last_advance_ms = 1000.0;
        let outcome = render_tick(1010.0, &mut state, &atlas(), &manifest(), Some(&1), &mut surface);
        assert!(matches!(outcome, TickOutcome::Drawn { frame_index: 1, .. }));
        assert_eq!(state.frame_index, 1);
    }

    #[test]
    fn test_tick_passes_view_state_to_compositor() {
        let mut surface = RecordingSurface::default();
        let mut state = playing("idle");
        state.set_zoom(3.0);
        state.toggle_mirror_x();
        render_tick(0.0, &mut state, &atlas(), &manifest(), Some(&1), &mut surface);
        let Call::Draw(_, cmd) = &surface.calls[1] else {
            panic!("expected a draw");
        };
        assert_eq!(cmd.transform.scale_x, -3.0);
        assert_eq!(cmd.transform.scale_y, 3.0);
        assert_eq!(cmd.transform.translate_x, 100.0);
        assert_eq!(cmd.transform.translate_y, 50.0);
        assert_eq!(cmd.dest, Rect::new(-4.0, -6.0, 8.0, 12.0));
    }

    #[test]
    fn test_debug_lines() {
        let outcome = TickOutcome::Drawn {
            frame_name: "walk_1".into(),
            frame_index: 0,
            frame_count: 2,
        };
        let lines = debug_lines(&outcome, &atlas(), &manifest(), Some((64, 32)));
        assert_eq!(
            lines,
            vec![
                "frame 1/2: walk_1",
                "atlas: 3 regions",
                "manifest: 3 animations",
                "texture: 64x32",
            ]
        );

        let idle = debug_lines(&TickOutcome::Idle(IdleReason::NoFrames), &Atlas::default(), &manifest(), None);
        assert_eq!(idle[0], "idle: NoFrames");
        assert_eq!(idle[3], "texture: none");
    }
}
