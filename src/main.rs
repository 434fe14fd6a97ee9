// What you SEE:
// • A dark room; only a soft circle of light around your square is visible.
// • Arrows/WASD move, Shift sprints, SPACE flips between wide and narrow light.
// • Fuel cans (amber) refill the light. Low sanity makes the view twitch.
// • R restarts, ESC quits.
// Optional first argument: path to a JSON config overriding any tunable.

use std::time::{Duration, Instant};

use hollow_lights::draw::{draw_text_5x7, Drawer};
use hollow_lights::fx::blit_shaken;
use hollow_lights::gamma::GammaLut;
use hollow_lights::scene::{draw_scene, wall_tiles};
use hollow_lights::{Error, Focus, FrameBuffer, GameConfig, Session};
use tracing_subscriber::EnvFilter;

const FUEL_TEXT: u32 = 0x00_f5_9e_0b;
const SANITY_TEXT: u32 = 0x00_60_a5_fa;
const FOCUS_TEXT: u32 = 0x00_94_a3_b8;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    /* --- Config ---
       Visual: nothing yet; defaults reproduce the reference tuning. */
    let cfg = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(%path, "loading config");
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };

    /* --- Window + buffers ---
       Visual: window opens at map size. `scene` is the lit room, `screen` is what we present. */
    let (w, h) = cfg.world.pixel_size();
    let mut drawer = Drawer::new("Hollow Lights", w, h)?;
    let mut scene = FrameBuffer::new(w, h);
    let mut screen = FrameBuffer::new(w, h);
    let walls = wall_tiles(&cfg.world);
    let lut = GammaLut::new();
    let darkness = cfg.mask.darkness_color;

    let mut session = Session::new(cfg);

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut last_frame_time = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        /* 1) Inputs */
        if drawer.r_pressed_once() {
            session.restart();
        }
        let input = drawer.poll_input();

        /* 2) Simulate: fuel, radius, sanity, darkness */
        let report = session.tick(dt, &input);

        /* 3) Room, then darkness on top of everything */
        draw_scene(&mut scene, &session.config().world, &walls, session.pickups(), session.player());
        session.occlusion().composite_onto(&mut scene, &lut)?;

        /* 4) HUD above the darkness */
        draw_text_5x7(&mut scene, 12, 10, &format!("FUEL: {:.0}", report.fuel), FUEL_TEXT);
        draw_text_5x7(&mut scene, 12, 22, &format!("SANITY: {:.0}", report.sanity), SANITY_TEXT);
        let focus = match report.focus {
            Focus::Wide => "WIDE",
            Focus::Narrow => "NARROW",
        };
        draw_text_5x7(&mut scene, 12, 34, focus, FOCUS_TEXT);

        /* 5) Distress shake, then present */
        blit_shaken(&scene, &mut screen, report.shake, darkness);
        drawer.present(&screen)?;

        /* 6) FPS line once per second */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            tracing::info!(
                fps = frames_this_second as f32 / secs,
                fuel = report.fuel,
                sanity = report.sanity,
                radius = report.radius,
                "frame stats"
            );
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
