// What you SEE:
// • GM window: the map with see-through fog and a ring showing the brush.
// • Player window: the same map with solid fog, no ring. It only changes
//   when you let go of the mouse button.
// • Hold Left Mouse: reveal. Hold Right Mouse: put fog back.
// • Wheel resizes the brush. R rotates the map (fog resets). ESC quits.

use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fogwarden::cli::CliArgs;
use fogwarden::compose::{render_view, screen_radius, FogStyle};
use fogwarden::config::load_settings;
use fogwarden::draw::{draw_ring, Drawer};
use fogwarden::gamma::GammaLut;
use fogwarden::image_source::{blank_map, load_map, rotate_clockwise};
use fogwarden::{DisplayRegion, Error, FrameBuffer, OcclusionController, StrokeMode};

/// One wheel notch, in the units `brush.sensitivity` is tuned for.
const SCROLL_STEP: f32 = 0.1;
const RING_COLOR: u32 = 0x00_FF_CC_33;

fn main() -> Result<(), Error> {
    /* --- Settings: defaults < fogwarden.toml < env < flags --- */
    let args = CliArgs::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    args.apply(&mut settings);
    init_tracing(&settings.log);
    settings.validate()?;

    /* --- Map + fog ---
       Visual: everything starts fogged. */
    let mut map = match &args.image {
        Some(path) => load_map(path)?,
        None => blank_map(settings.fog.width as usize, settings.fog.height as usize),
    };
    let (fog_w, fog_h) = settings.fog_dimensions(map.width, map.height);
    let mut fog = OcclusionController::new(fog_w, fog_h, settings.brush_size()?)?
        .with_mapping_policy(settings.fog.mapping);

    /* --- Two windows: GM edits, players watch --- */
    let win = &settings.window;
    let mut gm = Drawer::new("fogwarden - GM", win.gm_width, win.gm_height)?;
    let mut player = Drawer::new("fogwarden - Players", win.player_width, win.player_height)?;
    let mut gm_screen = FrameBuffer::solid(win.gm_width, win.gm_height, 0);
    let mut player_screen = FrameBuffer::solid(win.player_width, win.player_height, 0);

    let gm_style = FogStyle { color: settings.fog.color, alpha: settings.fog.gm_alpha };
    let player_style = FogStyle { color: settings.fog.color, alpha: settings.fog.player_alpha };
    let lut = GammaLut::new();

    let mut last_pointer = None;
    let mut last_radius = f32::NAN;

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    info!("ready: left drag reveals, right drag conceals, wheel resizes, R rotates");

    /* ------------------------------ Main loop ------------------------------ */
    while gm.is_open() && player.is_open() && !gm.esc_pressed() {
        /* 1) Follow window resizes. */
        let gm_resized = fit_screen(&mut gm_screen, gm.size());
        let player_resized = fit_screen(&mut player_screen, player.size());

        /* 2) Content swap: rotating the map gives it new dimensions and fresh fog. */
        if gm.rotate_pressed_once() {
            map = rotate_clockwise(&map);
            let (w, h) = settings.fog_dimensions(map.width, map.height);
            fog.reset_on_new_content(w, h)?;
            info!(width = map.width, height = map.height, "map rotated");
        }

        let gm_region = DisplayRegion::fit(map.width, map.height, gm_screen.width, gm_screen.height);
        let player_region = DisplayRegion::fit(map.width, map.height, player_screen.width, player_screen.height);

        /* 3) Inputs. Losing focus mid-drag ends the stroke so players still get it. */
        let focused = gm.has_focus();
        if !focused && fog.any_stroke_active() {
            fog.cancel_strokes()?;
        }

        let scroll = gm.scroll_delta();
        if scroll != 0.0 {
            fog.adjust_brush(scroll.signum() * SCROLL_STEP);
        }

        let buttons = [
            (StrokeMode::Reveal, focused && gm.left_mouse_down()),
            (StrokeMode::Conceal, focused && gm.right_mouse_down()),
        ];
        for (mode, down) in buttons {
            if down {
                fog.begin_stroke(mode);
            } else {
                fog.end_stroke(mode)?;
            }
        }

        let pointer = gm.pointer();
        if let Some(p) = pointer {
            fog.paint_at(p, &gm_region)?;
        }

        /* 4) GM view: recompose when fog changed or the ring moved. */
        let radius = fog.brush().radius();
        if radius != last_radius {
            gm.set_title(&format!("fogwarden - GM | brush {radius:.0}"));
        }
        let ring_moved = pointer != last_pointer || radius != last_radius;
        if fog.take_primary_dirty() || gm_resized || ring_moved {
            render_view(&mut gm_screen, &map, fog.primary(), &gm_region, gm_style, &lut);
            if let Some(p) = pointer {
                let r = screen_radius(radius, fog.primary(), &gm_region);
                draw_ring(&mut gm_screen, p.x as i32, p.y as i32, r.round() as i32, RING_COLOR);
            }
        }
        last_pointer = pointer;
        last_radius = radius;
        gm.present(&gm_screen)?;

        /* 5) Player view: only the mirror, only when it was synced. */
        if fog.take_mirror_dirty() || player_resized {
            render_view(&mut player_screen, &map, fog.mirror(), &player_region, player_style, &lut);
            player.present(&player_screen)?;
        } else {
            player.poll();
        }

        /* 6) FPS counter */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            debug!(fps = frames_this_second as f32 / secs, "frame rate");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    fog.cancel_strokes()?;
    info!("bye");
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Reallocates `screen` when the window size changed. Returns true if it did.
fn fit_screen(screen: &mut FrameBuffer, (width, height): (usize, usize)) -> bool {
    if (screen.width, screen.height) == (width, height) || width == 0 || height == 0 {
        return false;
    }
    *screen = FrameBuffer::solid(width, height, 0);
    true
}
