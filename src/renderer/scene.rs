//! Whole-frame composition
//!
//! Draw order, back to front: sky, hazards, projectiles, pickups,
//! particles, craft, active-effect list, banners.

use glam::Vec2;

use super::starfield::Starfield;
use super::{DrawSurface, TextAlign, TextStyle, colors, shapes};
use crate::sim::{EffectCategory, GamePhase, GameState};

const EFFECT_LIST_X: f32 = 10.0;
const EFFECT_LIST_Y: f32 = 100.0;
const EFFECT_LIST_STEP: f32 = 25.0;
const EFFECT_TEXT_SIZE: f32 = 16.0;

const BANNER_Y: f32 = 150.0;
/// Distance a banner drifts upward over its lifetime
const BANNER_RISE: f32 = 50.0;
const BANNER_STACK_STEP: f32 = 35.0;
const BANNER_TEXT_SIZE: f32 = 28.0;

/// Draws a [`GameState`] onto any [`DrawSurface`]
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    starfield: Starfield,
}

impl SceneRenderer {
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self {
            starfield: Starfield::new(seed, bounds),
        }
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    /// Emit one frame. The sky only scrolls while a session is running.
    pub fn draw<S: DrawSurface + ?Sized>(
        &mut self,
        state: &GameState,
        surface: &mut S,
        now_ms: f64,
    ) {
        let bounds = Vec2::new(state.tuning.field.width, state.tuning.field.height);
        surface.clear(bounds, colors::BACKGROUND);

        if state.phase == GamePhase::Running {
            self.starfield.advance();
        }
        self.starfield.draw(surface);

        for hazard in state.hazards.iter().filter(|h| h.alive) {
            shapes::hazard(surface, hazard);
        }
        for projectile in state
            .ally_projectiles
            .iter()
            .chain(&state.hostile_projectiles)
            .filter(|p| p.alive)
        {
            shapes::projectile(surface, projectile);
        }
        for pickup in state.pickups.iter().filter(|p| p.alive) {
            shapes::pickup(surface, pickup);
        }
        for particle in &state.particles {
            shapes::particle(surface, particle);
        }

        shapes::craft(surface, &state.craft);

        draw_effect_list(state, surface, now_ms);
        draw_banners(state, surface, now_ms, bounds.x);
    }
}

fn draw_effect_list<S: DrawSurface + ?Sized>(state: &GameState, surface: &mut S, now_ms: f64) {
    let style = TextStyle {
        size: EFFECT_TEXT_SIZE,
        color: colors::TEXT,
        bold: false,
        align: TextAlign::Left,
    };
    for (i, entry) in state.effects.active_entries(now_ms).iter().enumerate() {
        let pos = Vec2::new(EFFECT_LIST_X, EFFECT_LIST_Y + i as f32 * EFFECT_LIST_STEP);
        surface.fill_text(&format!("{}: {}s", entry.label, entry.remaining_secs), pos, style);
    }
}

fn draw_banners<S: DrawSurface + ?Sized>(
    state: &GameState,
    surface: &mut S,
    now_ms: f64,
    field_width: f32,
) {
    let lifetime = state.tuning.rules.banner_ms.max(1.0);
    let live = state.banners.iter().filter(|b| b.expires_at_ms > now_ms);
    for (i, banner) in live.enumerate() {
        // 0 when shown, 1 when gone
        let t = (1.0 - (banner.expires_at_ms - now_ms) / lifetime).clamp(0.0, 1.0) as f32;
        let base = match banner.category {
            EffectCategory::Beneficial => colors::BANNER_GOOD,
            EffectCategory::Harmful => colors::BANNER_BAD,
        };
        let color = [base[0], base[1], base[2], 1.0 - t];
        let pos = Vec2::new(
            field_width / 2.0,
            BANNER_Y + i as f32 * BANNER_STACK_STEP - BANNER_RISE * t,
        );
        surface.fill_text(
            &banner.text,
            pos,
            TextStyle {
                size: BANNER_TEXT_SIZE,
                color,
                bold: true,
                align: TextAlign::Center,
            },
        );
    }
}
