//! Astro Flap - A side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, collisions, timers, session)
//! - `renderer`: Draw-surface abstraction and scene drawing
//! - `platform`: Clock and frame scheduling abstraction
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GamePhase, Hud, Session, Summary};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
///
/// Motion values are per frame at the 60 Hz reference rate; durations are
/// in milliseconds.
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Craft defaults
    pub const CRAFT_WIDTH: f32 = 40.0;
    pub const CRAFT_HEIGHT: f32 = 30.0;
    pub const CRAFT_START_X: f32 = 100.0;
    pub const CRAFT_GRAVITY: f32 = 0.5;
    pub const CRAFT_LIFT_IMPULSE: f32 = -8.0;
    pub const CRAFT_FIRE_INTERVAL_MS: f64 = 400.0;
    pub const RAPID_FIRE_INTERVAL_MS: f64 = 150.0;

    /// Hazard defaults
    pub const HAZARD_SIZE: f32 = 35.0;
    pub const HAZARD_MIN_SPEED: f32 = 2.0;
    pub const HAZARD_MAX_SPEED: f32 = 4.0;
    /// Vertical spawn margin from the top and bottom edges
    pub const HAZARD_SPAWN_MARGIN: f32 = 50.0;
    /// Hazards only fire while this far from both side edges
    pub const HAZARD_FIRE_BAND: f32 = 100.0;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 4.0;
    pub const PROJECTILE_SPEED: f32 = 8.0;

    /// Pickup defaults
    pub const PICKUP_SIZE: f32 = 30.0;
    pub const PICKUP_GRAVITY: f32 = 0.3;
    pub const PICKUP_SPIN: f32 = 0.05;
    /// Horizontal spawn margin from the side edges
    pub const PICKUP_SPAWN_MARGIN: f32 = 100.0;
    /// A pickup drops every this many kills
    pub const KILL_MILESTONE: u32 = 10;

    /// Particle defaults
    pub const PARTICLE_BURST: usize = 15;
    pub const PARTICLE_SPEED: f32 = 5.0;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_MIN_SIZE: f32 = 2.0;
    pub const PARTICLE_SIZE_RANGE: f32 = 3.0;

    /// Lives
    pub const MAX_LIVES: u8 = 3;

    /// Scoring
    pub const KILL_POINTS: u64 = 2;
    pub const SURVIVAL_POINTS: u64 = 5;
    pub const SURVIVAL_INTERVAL_MS: f64 = 10_000.0;

    /// Timed effects
    pub const RECOVERY_MS: f64 = 2000.0;
    pub const PICKUP_EFFECT_MS: f64 = 5000.0;
    pub const BANNER_MS: f64 = 2100.0;

    /// Difficulty progression
    pub const DIFFICULTY_INTERVAL_MS: f64 = 30_000.0;
    pub const INITIAL_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 500.0;
    pub const SPAWN_INTERVAL_FACTOR: f64 = 0.85;
    pub const INITIAL_HAZARDS_PER_SPAWN: u32 = 1;
    pub const MAX_HAZARDS_PER_SPAWN: u32 = 5;
    pub const INITIAL_FIRE_FREQUENCY_MS: f64 = 2000.0;
    pub const MIN_FIRE_FREQUENCY_MS: f64 = 800.0;
    pub const FIRE_FREQUENCY_FACTOR: f64 = 0.9;

    /// Background stars
    pub const STAR_COUNT: usize = 100;
}
