//! Scrolling background stars
//!
//! Purely cosmetic: has its own RNG so drawing never perturbs the
//! simulation's seeded stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{DrawSurface, colors};
use crate::consts::STAR_COUNT;
use crate::sim::Rect;

const STAR_MAX_SIZE: f32 = 2.0;
const STAR_MIN_SPEED: f32 = 0.2;
const STAR_SPEED_RANGE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Leftward drift, px per frame
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    bounds: Vec2,
    rng: Pcg32,
}

impl Starfield {
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * bounds.x,
                    rng.random::<f32>() * bounds.y,
                ),
                size: rng.random::<f32>() * STAR_MAX_SIZE,
                speed: rng.random::<f32>() * STAR_SPEED_RANGE + STAR_MIN_SPEED,
            })
            .collect();
        Self { stars, bounds, rng }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Drift every star left; one that leaves re-enters at the right edge
    /// at a fresh height
    pub fn advance(&mut self) {
        for star in &mut self.stars {
            star.pos.x -= star.speed;
            if star.pos.x < 0.0 {
                star.pos.x = self.bounds.x;
                star.pos.y = self.rng.random::<f32>() * self.bounds.y;
            }
        }
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for star in &self.stars {
            surface.fill_rect(
                Rect::new(star.pos.x, star.pos.y, star.size, star.size),
                colors::STAR,
            );
        }
    }
}
