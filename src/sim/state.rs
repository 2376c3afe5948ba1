//! Game state and core simulation types
//!
//! One `GameState` holds everything a session mutates: the craft, every
//! entity collection, counters, difficulty, timers and the RNG.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{EffectCategory, PickupEffect, TimedEffect};
use super::entities::{Craft, Hazard, Particle, Pickup, Projectile};
use super::spawner::{Difficulty, Spawner};
use super::timers::EffectRegistry;
use crate::tuning::Tuning;

/// Particle colors (0xRRGGBB)
pub const LIFE_LOST_COLOR: u32 = 0xff0000;
pub const HAZARD_COLOR: u32 = 0xff006e;
pub const BENEFICIAL_COLOR: u32 = 0xffd700;
pub const HARMFUL_COLOR: u32 = 0xff0000;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session started yet
    Idle,
    /// Frames advance the simulation
    Running,
    /// Out of lives; frozen until the next start command
    Ended,
}

/// Notable things that happened during a frame, for the host UI
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted { seed: u64 },
    LifeLost { lives: u8 },
    LifeGained { lives: u8 },
    HazardDestroyed { kills: u32 },
    PickupSpawned,
    EffectTriggered(PickupEffect),
    EffectExpired(TimedEffect),
    DifficultyUp { level: u32 },
    SessionEnded { score: u64, kills: u32 },
}

/// A transient on-screen notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    pub category: EffectCategory,
    pub expires_at_ms: f64,
}

/// RNG state wrapper for serialization
///
/// Each draw comes from its own PCG stream, so entity seeds depend only on
/// the run seed and how many seeds were drawn before.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Next per-entity seed
    pub fn next_seed(&mut self) -> u64 {
        let mut rng = Pcg32::new(self.seed, self.stream);
        self.stream = self.stream.wrapping_add(1);
        rng.next_u64()
    }

    /// A throwaway generator for cosmetic bursts
    pub fn fork(&mut self) -> Pcg32 {
        Pcg32::seed_from_u64(self.next_seed())
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub kills: u32,
    pub lives: u8,
    /// Clock reading of the previous frame
    pub last_frame_ms: f64,
    /// Clock reading of the last survival bonus (or session start)
    pub last_score_ms: f64,
    pub difficulty: Difficulty,
    pub spawner: Spawner,
    pub craft: Craft,
    pub hazards: Vec<Hazard>,
    pub ally_projectiles: Vec<Projectile>,
    pub hostile_projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    pub effects: EffectRegistry,
    pub banners: Vec<Banner>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Undrained events
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle state; nothing moves until [`GameState::start`]
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng_state: RngState::new(seed),
            phase: GamePhase::Idle,
            score: 0,
            kills: 0,
            lives: tuning.rules.max_lives,
            last_frame_ms: 0.0,
            last_score_ms: 0.0,
            difficulty: Difficulty::new(&tuning.difficulty, 0.0),
            spawner: Spawner::default(),
            craft: Craft::new(&tuning),
            hazards: Vec::new(),
            ally_projectiles: Vec::new(),
            hostile_projectiles: Vec::new(),
            pickups: Vec::new(),
            effects: EffectRegistry::new(),
            banners: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Full reset into a fresh running session; pending timers become stale
    pub fn start(&mut self, now_ms: f64) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.kills = 0;
        self.lives = self.tuning.rules.max_lives;
        self.last_frame_ms = now_ms;
        self.last_score_ms = now_ms;
        self.difficulty = Difficulty::new(&self.tuning.difficulty, now_ms);
        self.spawner = Spawner::default();
        self.craft = Craft::new(&self.tuning);
        self.hazards.clear();
        self.ally_projectiles.clear();
        self.hostile_projectiles.clear();
        self.pickups.clear();
        self.particles.clear();
        self.banners.clear();
        self.effects.reset();

        log::info!(
            "Session started (seed {}, generation {})",
            self.seed,
            self.effects.generation()
        );
        self.events.push(GameEvent::SessionStarted { seed: self.seed });
    }

    /// Enter the terminal phase; only the first call has any effect
    pub fn end(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Ended;
        log::info!("Session ended: score {}, kills {}", self.score, self.kills);
        self.events.push(GameEvent::SessionEnded {
            score: self.score,
            kills: self.kills,
        });
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take a life unless invincible; starts the recovery window or ends the run
    pub fn lose_life(&mut self, now_ms: f64) {
        if self.phase != GamePhase::Running || self.craft.invincible {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.burst(self.craft.bounds().center(), LIFE_LOST_COLOR);
        log::debug!("Life lost, {} remaining", self.lives);
        self.events.push(GameEvent::LifeLost { lives: self.lives });

        if self.lives == 0 {
            self.end();
        } else {
            self.start_timed(TimedEffect::Recovery, now_ms, self.tuning.rules.recovery_ms);
        }
    }

    /// Add a life, capped at the maximum; ignored once the session is over
    pub fn gain_life(&mut self) {
        if self.phase == GamePhase::Running && self.lives < self.tuning.rules.max_lives {
            self.lives += 1;
            self.events.push(GameEvent::LifeGained { lives: self.lives });
        }
    }

    /// Spawn one explosion's worth of particles
    pub fn burst(&mut self, center: Vec2, color: u32) {
        let mut rng = self.rng_state.fork();
        let count = self.tuning.particles.burst;
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(Particle::new(center, color, &mut rng, &self.tuning.particles));
        }
    }

    /// Show a banner for the configured time
    pub fn push_banner(&mut self, text: impl Into<String>, category: EffectCategory, now_ms: f64) {
        self.banners.push(Banner {
            text: text.into(),
            category,
            expires_at_ms: now_ms + self.tuning.rules.banner_ms,
        });
    }

    /// Spawn one hazard at the right edge
    pub fn spawn_hazard(&mut self) {
        let id = self.next_entity_id();
        let seed = self.rng_state.next_seed();
        let hazard = Hazard::from_seed(id, seed, &self.tuning, self.difficulty.fire_frequency_ms);
        self.hazards.push(hazard);
    }

    /// Drop one pickup from the top edge
    pub fn spawn_pickup(&mut self) {
        let id = self.next_entity_id();
        let seed = self.rng_state.next_seed();
        self.pickups.push(Pickup::from_seed(id, seed, &self.tuning));
        log::debug!("Pickup {} dropped at {} kills", id, self.kills);
        self.events.push(GameEvent::PickupSpawned);
    }

    /// Kill the hazard at `index`: score, particles, and a pickup on milestones
    pub fn destroy_hazard(&mut self, index: usize) {
        let Some(hazard) = self.hazards.get_mut(index) else {
            return;
        };
        hazard.alive = false;
        let center = hazard.bounds().center();

        self.burst(center, HAZARD_COLOR);
        self.kills += 1;
        self.score += self.tuning.rules.kill_points;
        self.events.push(GameEvent::HazardDestroyed { kills: self.kills });

        if super::spawner::is_pickup_milestone(self.kills, self.tuning.pickup.kill_milestone) {
            self.spawn_pickup();
        }
    }

    /// Resolve one random effect from a collected pickup
    pub fn activate_pickup(&mut self, pickup: &Pickup, now_ms: f64) -> PickupEffect {
        let effect = pickup.roll_effect();
        log::debug!("Pickup {} resolved to {:?}", pickup.id, effect);

        self.push_banner(effect.label(), effect.category(), now_ms);
        self.events.push(GameEvent::EffectTriggered(effect));
        self.apply_effect(effect, now_ms);

        let color = match effect.category() {
            EffectCategory::Beneficial => BENEFICIAL_COLOR,
            EffectCategory::Harmful => HARMFUL_COLOR,
        };
        self.burst(pickup.bounds().center(), color);
        effect
    }

    /// Apply a catalog effect to the craft or the session
    pub fn apply_effect(&mut self, effect: PickupEffect, now_ms: f64) {
        match effect {
            PickupEffect::ExtraLife => self.gain_life(),
            PickupEffect::LoseLife => self.lose_life(now_ms),
            timed => {
                if let Some(kind) = timed.timed() {
                    let duration = self.tuning.pickup.effect_duration_ms;
                    self.start_timed(kind, now_ms, duration);
                }
            }
        }
    }

    /// Register a timed modifier, applying it only if none of its kind is live
    pub fn start_timed(&mut self, kind: TimedEffect, now_ms: f64, duration_ms: f64) {
        if !self.effects.is_active(kind) {
            self.apply_modifier(kind);
        }
        self.effects.register(kind, now_ms, duration_ms);
    }

    fn apply_modifier(&mut self, kind: TimedEffect) {
        let base = &self.tuning.craft;
        match kind {
            TimedEffect::Recovery | TimedEffect::Shield => self.craft.invincible = true,
            TimedEffect::RapidFire => self.craft.fire_interval_ms = base.rapid_fire_interval_ms,
            TimedEffect::ReverseControls => self.craft.lift_impulse = -base.lift_impulse,
            TimedEffect::HeavyShip => self.craft.gravity = base.gravity * 2.0,
        }
    }

    fn revert_modifier(&mut self, kind: TimedEffect) {
        let base = &self.tuning.craft;
        match kind {
            // Another invincibility source may still be running
            TimedEffect::Recovery | TimedEffect::Shield => {
                self.craft.invincible = self.effects.grants_invincibility()
            }
            TimedEffect::RapidFire => self.craft.fire_interval_ms = base.fire_interval_ms,
            TimedEffect::ReverseControls => self.craft.lift_impulse = base.lift_impulse,
            TimedEffect::HeavyShip => self.craft.gravity = base.gravity,
        }
    }

    /// Run the reverts of every timer due at `now_ms`
    pub fn service_timers(&mut self, now_ms: f64) {
        let mut reverted: Vec<TimedEffect> = Vec::new();
        for expired in self.effects.expire(now_ms) {
            if expired.generation != self.effects.generation() || reverted.contains(&expired.kind) {
                continue;
            }
            // Last one of its kind out restores the base value
            if !self.effects.is_active(expired.kind) {
                reverted.push(expired.kind);
                self.revert_modifier(expired.kind);
                log::debug!("{:?} expired", expired.kind);
                self.events.push(GameEvent::EffectExpired(expired.kind));
            }
        }
    }

    /// Drop every entity marked for removal this frame
    pub fn sweep(&mut self, now_ms: f64) {
        self.hazards.retain(|h| h.alive);
        self.ally_projectiles.retain(|p| p.alive);
        self.hostile_projectiles.retain(|p| p.alive);
        self.pickups.retain(|p| p.alive);
        self.particles.retain(|p| !p.is_dead());
        self.banners.retain(|b| b.expires_at_ms > now_ms);
    }
}
