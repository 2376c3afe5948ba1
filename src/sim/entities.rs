//! Field entities: the craft, hazards, projectiles, pickups and particles
//!
//! Motion is integrated once per frame (velocities are px/frame at the 60 Hz
//! reference rate); cooldowns accumulate real milliseconds.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::PickupEffect;
use crate::tuning::{FieldTuning, ParticleTuning, ProjectileTuning, Tuning};

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Ally,
    Hostile,
}

impl Side {
    /// Horizontal direction sign (+1 right, -1 left)
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Side::Ally => 1.0,
            Side::Hostile => -1.0,
        }
    }
}

/// What happened to the craft during its update
#[derive(Debug, Clone, Default)]
pub struct CraftUpdate {
    /// Touched the top or bottom edge this frame
    pub hit_boundary: bool,
    pub shot: Option<Projectile>,
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (px/frame, positive = down)
    pub velocity: f32,
    pub gravity: f32,
    pub lift_impulse: f32,
    /// Time since the last shot
    pub fire_cooldown_ms: f64,
    pub fire_interval_ms: f64,
    pub invincible: bool,
}

impl Craft {
    pub fn new(tuning: &Tuning) -> Self {
        let c = &tuning.craft;
        Self {
            pos: Vec2::new(c.start_x, tuning.field.height / 2.0),
            size: Vec2::new(c.width, c.height),
            velocity: 0.0,
            gravity: c.gravity,
            lift_impulse: c.lift_impulse,
            fire_cooldown_ms: 0.0,
            fire_interval_ms: c.fire_interval_ms,
            invincible: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// One lift signal: velocity jumps to the impulse
    pub fn apply_lift(&mut self) {
        self.velocity = self.lift_impulse;
    }

    /// Integrate gravity, clamp to the field, and auto-fire
    pub fn update(
        &mut self,
        dt_ms: f64,
        field: &FieldTuning,
        projectile: &ProjectileTuning,
    ) -> CraftUpdate {
        let mut result = CraftUpdate::default();

        self.velocity += self.gravity;
        self.pos.y += self.velocity;

        if self.pos.y < 0.0 {
            result.hit_boundary = true;
            self.pos.y = 0.0;
            self.velocity = 0.0;
        }
        if self.pos.y + self.size.y > field.height {
            result.hit_boundary = true;
            self.pos.y = field.height - self.size.y;
            self.velocity = 0.0;
        }

        self.fire_cooldown_ms += dt_ms;
        if self.fire_cooldown_ms >= self.fire_interval_ms {
            result.shot = Some(self.shoot(projectile));
            self.fire_cooldown_ms = 0.0;
        }

        result
    }

    /// Bullet leaving the nose of the craft
    pub fn shoot(&self, projectile: &ProjectileTuning) -> Projectile {
        Projectile::new(
            Vec2::new(self.pos.x + self.size.x, self.pos.y + self.size.y / 2.0),
            Side::Ally,
            projectile,
        )
    }
}

/// An enemy drifting right to left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed (px/frame), always positive
    pub speed: f32,
    pub fire_cooldown_ms: f64,
    pub alive: bool,
}

impl Hazard {
    /// Build a hazard at the right edge; position, speed and fire phase come
    /// from `seed` alone
    pub fn from_seed(id: u32, seed: u64, tuning: &Tuning, fire_frequency_ms: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let h = &tuning.hazard;

        let span = (tuning.field.height - h.size - 2.0 * h.spawn_margin).max(0.0);
        let y = rng.random::<f32>() * span + h.spawn_margin;
        let speed = h.min_speed + rng.random::<f32>() * (h.max_speed - h.min_speed);
        let phase = rng.random::<f64>() * fire_frequency_ms;

        Self {
            id,
            pos: Vec2::new(tuning.field.width, y),
            size: Vec2::splat(h.size),
            speed,
            fire_cooldown_ms: phase,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Move left; fire when the cooldown is due and the hazard is inside the
    /// firing band
    pub fn update(
        &mut self,
        dt_ms: f64,
        fire_frequency_ms: f64,
        tuning: &Tuning,
    ) -> Option<Projectile> {
        self.pos.x -= self.speed;

        self.fire_cooldown_ms += dt_ms;
        let band = tuning.hazard.fire_band;
        let in_band = self.pos.x < tuning.field.width - band && self.pos.x > band;
        if self.fire_cooldown_ms >= fire_frequency_ms && in_band {
            self.fire_cooldown_ms = 0.0;
            return Some(self.shoot(&tuning.projectile));
        }
        None
    }

    pub fn shoot(&self, projectile: &ProjectileTuning) -> Projectile {
        Projectile::new(
            Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0),
            Side::Hostile,
            projectile,
        )
    }

    /// Fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }
}

/// A bullet travelling horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub side: Side,
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, side: Side, tuning: &ProjectileTuning) -> Self {
        Self {
            pos,
            size: Vec2::new(tuning.width, tuning.height),
            speed: tuning.speed,
            side,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn update(&mut self) {
        self.pos.x += self.speed * self.side.sign();
    }

    /// Past the edge it is travelling toward
    pub fn is_off_screen(&self, field_width: f32) -> bool {
        match self.side {
            Side::Ally => self.pos.x >= field_width,
            Side::Hostile => self.pos.x <= 0.0,
        }
    }
}

/// A falling mystery box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity: f32,
    pub gravity: f32,
    /// Cosmetic spin (radians)
    pub rotation: f32,
    pub spin: f32,
    /// Seed for the effect roll on activation
    pub effect_seed: u64,
    pub alive: bool,
}

impl Pickup {
    /// Build a pickup just above the top edge at a seeded column
    pub fn from_seed(id: u32, seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let p = &tuning.pickup;

        let span = (tuning.field.width - 2.0 * p.spawn_margin).max(0.0);
        let x = rng.random::<f32>() * span + p.spawn_margin;

        Self {
            id,
            pos: Vec2::new(x, -p.size),
            size: Vec2::splat(p.size),
            velocity: 0.0,
            gravity: p.gravity,
            rotation: 0.0,
            spin: p.spin,
            effect_seed: rng.random(),
            alive: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn update(&mut self) {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;
        self.rotation += self.spin;
    }

    /// Uniform pick from the catalog
    pub fn roll_effect(&self) -> PickupEffect {
        let mut rng = Pcg32::seed_from_u64(self.effect_seed);
        PickupEffect::roll(&mut rng)
    }

    pub fn is_off_screen(&self, field_height: f32) -> bool {
        self.pos.y >= field_height
    }
}

/// A fading explosion fragment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at birth, dead at 0.0
    pub life: f32,
    pub decay: f32,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Particle {
    pub fn new<R: Rng>(pos: Vec2, color: u32, rng: &mut R, tuning: &ParticleTuning) -> Self {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * tuning.speed,
            (rng.random::<f32>() - 0.5) * tuning.speed,
        );
        Self {
            pos,
            vel,
            life: 1.0,
            decay: tuning.decay,
            size: rng.random::<f32>() * tuning.size_range + tuning.min_size,
            color,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_craft_falls_under_gravity() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        let y0 = craft.pos.y;

        craft.update(16.0, &tuning.field, &tuning.projectile);
        assert!((craft.velocity - tuning.craft.gravity).abs() < 1e-6);
        assert!((craft.pos.y - (y0 + tuning.craft.gravity)).abs() < 1e-6);
    }

    #[test]
    fn test_craft_lift_sets_impulse() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        craft.velocity = 5.0;
        craft.apply_lift();
        assert_eq!(craft.velocity, tuning.craft.lift_impulse);
    }

    #[test]
    fn test_craft_clamps_at_top() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        craft.pos.y = 2.0;
        craft.velocity = -8.0;

        let result = craft.update(16.0, &tuning.field, &tuning.projectile);
        assert!(result.hit_boundary);
        assert_eq!(craft.pos.y, 0.0);
        assert_eq!(craft.velocity, 0.0);
    }

    #[test]
    fn test_craft_clamps_at_bottom() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);
        craft.pos.y = tuning.field.height - craft.size.y;
        craft.velocity = 3.0;

        let result = craft.update(16.0, &tuning.field, &tuning.projectile);
        assert!(result.hit_boundary);
        assert_eq!(craft.pos.y, tuning.field.height - craft.size.y);
        assert_eq!(craft.velocity, 0.0);
    }

    #[test]
    fn test_craft_auto_fire() {
        let tuning = Tuning::default();
        let mut craft = Craft::new(&tuning);

        assert!(craft.update(200.0, &tuning.field, &tuning.projectile).shot.is_none());
        let shot = craft
            .update(200.0, &tuning.field, &tuning.projectile)
            .shot
            .expect("should fire at the interval");
        assert_eq!(shot.side, Side::Ally);
        assert_eq!(shot.pos.x, craft.pos.x + craft.size.x);
        assert_eq!(craft.fire_cooldown_ms, 0.0);
    }

    #[test]
    fn test_hazard_seed_is_reproducible_and_in_range() {
        let tuning = Tuning::default();
        for seed in 0..200u64 {
            let a = Hazard::from_seed(1, seed, &tuning, 2000.0);
            let b = Hazard::from_seed(1, seed, &tuning, 2000.0);
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.speed, b.speed);
            assert_eq!(a.fire_cooldown_ms, b.fire_cooldown_ms);

            assert!(a.speed >= 2.0 && a.speed <= 4.0);
            assert!(a.pos.y >= 50.0 && a.pos.y <= tuning.field.height - 35.0 - 50.0);
            assert!(a.fire_cooldown_ms >= 0.0 && a.fire_cooldown_ms < 2000.0);
            assert_eq!(a.pos.x, tuning.field.width);
        }
    }

    #[test]
    fn test_hazard_holds_fire_outside_band() {
        let tuning = Tuning::default();
        let mut hazard = Hazard::from_seed(1, 3, &tuning, 2000.0);
        // Just spawned at the right edge: ready to fire but outside the band
        hazard.fire_cooldown_ms = 5000.0;
        assert!(hazard.update(16.0, 2000.0, &tuning).is_none());

        hazard.pos.x = 400.0;
        let shot = hazard.update(16.0, 2000.0, &tuning).expect("inside band");
        assert_eq!(shot.side, Side::Hostile);
        assert_eq!(hazard.fire_cooldown_ms, 0.0);

        hazard.pos.x = 90.0;
        hazard.fire_cooldown_ms = 5000.0;
        assert!(hazard.update(16.0, 2000.0, &tuning).is_none());
    }

    #[test]
    fn test_projectile_off_screen_per_side() {
        let tuning = Tuning::default();
        let mut ally = Projectile::new(Vec2::new(795.0, 100.0), Side::Ally, &tuning.projectile);
        assert!(!ally.is_off_screen(800.0));
        ally.update();
        assert!(ally.is_off_screen(800.0));

        let mut hostile = Projectile::new(Vec2::new(5.0, 100.0), Side::Hostile, &tuning.projectile);
        assert!(!hostile.is_off_screen(800.0));
        hostile.update();
        assert!(hostile.is_off_screen(800.0));
    }

    #[test]
    fn test_pickup_falls_and_spins() {
        let tuning = Tuning::default();
        let mut pickup = Pickup::from_seed(1, 11, &tuning);
        assert_eq!(pickup.pos.y, -tuning.pickup.size);
        assert!(pickup.pos.x >= 100.0 && pickup.pos.x <= 700.0);

        pickup.update();
        pickup.update();
        assert!((pickup.velocity - 0.6).abs() < 1e-5);
        assert!((pickup.rotation - 0.1).abs() < 1e-5);
        assert_eq!(pickup.roll_effect(), pickup.roll_effect());
    }

    #[test]
    fn test_particle_decays_to_death() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particle = Particle::new(Vec2::ZERO, 0xff0000, &mut rng, &tuning.particles);
        assert!(particle.size >= 2.0 && particle.size < 5.0);

        let mut frames = 0;
        while !particle.is_dead() {
            particle.update();
            frames += 1;
        }
        assert!((49..=51).contains(&frames));
    }
}
