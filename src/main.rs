//! Astro Flap headless runner
//!
//! Plays one session with a simple autopilot on a manual 60 Hz clock and
//! reports the result.
//!
//! Usage: `astro-flap [seed] [tuning.json]`

use anyhow::{Context, Result};
use glam::Vec2;

use astro_flap::platform::{Clock, FrameDriver, ManualClock, ManualScheduler};
use astro_flap::renderer::{Color, DrawSurface, TextStyle};
use astro_flap::sim::{GameEvent, GameState, Rect};
use astro_flap::Tuning;

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Ten minutes of play
const MAX_FRAMES: u64 = 60 * 60 * 10;
const DEFAULT_SEED: u64 = 0x00A5_7E0F;

/// Counts primitives instead of drawing them
#[derive(Debug, Default)]
struct CountingSurface {
    primitives: u64,
}

impl DrawSurface for CountingSurface {
    fn clear(&mut self, _size: Vec2, _color: Color) {}

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.primitives += 1;
    }

    fn fill_rotated_rect(
        &mut self,
        _center: Vec2,
        _size: Vec2,
        _angle: f32,
        _fill: Color,
        _outline: Option<Color>,
    ) {
        self.primitives += 1;
    }

    fn fill_text(&mut self, _text: &str, _pos: Vec2, _style: TextStyle) {
        self.primitives += 1;
    }
}

fn load_tuning(path: &str) -> Result<Tuning> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading tuning file {path}"))?;
    Tuning::from_json(&text).with_context(|| format!("parsing tuning file {path}"))
}

/// Height the autopilot steers toward: the nearest hazard still ahead,
/// otherwise mid-field
fn aim_height(state: &GameState) -> f32 {
    let craft_x = state.craft.pos.x;
    state
        .hazards
        .iter()
        .filter(|h| h.alive && h.bounds().right() > craft_x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|h| h.bounds().center().y)
        .unwrap_or(state.tuning.field.height / 2.0)
}

/// Press lift when it would move the craft toward its aim; reversed
/// controls push downward instead
fn wants_lift(state: &GameState) -> bool {
    let craft = &state.craft;
    let y = craft.bounds().center().y;
    let target = aim_height(state);
    if craft.lift_impulse < 0.0 {
        y > target && craft.velocity >= 0.0
    } else {
        y < target && craft.velocity <= 0.0
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("seed must be an unsigned integer, got {raw:?}"))?,
        None => DEFAULT_SEED,
    };
    let tuning = match args.next() {
        Some(path) => load_tuning(&path)?,
        None => Tuning::default(),
    };

    log::info!("Astro Flap (headless) starting with seed {seed}");

    let mut driver = FrameDriver::new(seed, tuning, ManualClock::new(0.0), ManualScheduler::new());
    let mut surface = CountingSurface::default();
    let mut pickups = 0u32;

    driver.on_start_command();
    while driver.scheduler_mut().take_request() {
        if driver.frames() >= MAX_FRAMES {
            log::warn!("Frame cap reached, stopping the run");
            break;
        }
        driver.clock_mut().advance(FRAME_MS);
        if wants_lift(driver.session().state()) {
            driver.on_lift_signal();
        }
        driver.on_frame(&mut surface);

        for event in driver.session_mut().drain_events() {
            log::debug!("{event:?}");
            if let GameEvent::EffectTriggered(_) = event {
                pickups += 1;
            }
        }
    }

    let hud = driver.session().hud();
    let seconds = driver.clock().now_ms() / 1000.0;
    match driver.session().summary() {
        Some(summary) => {
            log::info!("Session ended after {seconds:.1}s");
            println!("Game over: score {} with {} kills", summary.score, summary.kills);
        }
        None => println!(
            "Still flying after {seconds:.1}s: score {} with {} kills, {} lives left",
            hud.score, hud.kills, hud.lives
        ),
    }
    println!(
        "{} frames, {} primitives drawn, {} pickups collected",
        driver.frames(),
        surface.primitives,
        pickups
    );
    Ok(())
}
