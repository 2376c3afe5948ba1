//! Data-driven game balance
//!
//! Every number the simulation reads lives here. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Playfield size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Player craft physics and weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftTuning {
    pub width: f32,
    pub height: f32,
    pub start_x: f32,
    /// Downward acceleration (px/frame²)
    pub gravity: f32,
    /// Velocity set by a lift signal (negative = up)
    pub lift_impulse: f32,
    pub fire_interval_ms: f64,
    /// Fire interval while Rapid Fire is active
    pub rapid_fire_interval_ms: f64,
}

impl Default for CraftTuning {
    fn default() -> Self {
        Self {
            width: CRAFT_WIDTH,
            height: CRAFT_HEIGHT,
            start_x: CRAFT_START_X,
            gravity: CRAFT_GRAVITY,
            lift_impulse: CRAFT_LIFT_IMPULSE,
            fire_interval_ms: CRAFT_FIRE_INTERVAL_MS,
            rapid_fire_interval_ms: RAPID_FIRE_INTERVAL_MS,
        }
    }
}

/// Enemy hazards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    pub size: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub spawn_margin: f32,
    pub fire_band: f32,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            size: HAZARD_SIZE,
            min_speed: HAZARD_MIN_SPEED,
            max_speed: HAZARD_MAX_SPEED,
            spawn_margin: HAZARD_SPAWN_MARGIN,
            fire_band: HAZARD_FIRE_BAND,
        }
    }
}

/// Bullets (shared by both sides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            speed: PROJECTILE_SPEED,
        }
    }
}

/// Falling mystery pickups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub size: f32,
    pub gravity: f32,
    pub spin: f32,
    pub spawn_margin: f32,
    pub kill_milestone: u32,
    pub effect_duration_ms: f64,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            size: PICKUP_SIZE,
            gravity: PICKUP_GRAVITY,
            spin: PICKUP_SPIN,
            spawn_margin: PICKUP_SPAWN_MARGIN,
            kill_milestone: KILL_MILESTONE,
            effect_duration_ms: PICKUP_EFFECT_MS,
        }
    }
}

/// Explosion particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTuning {
    pub burst: usize,
    pub speed: f32,
    pub decay: f32,
    pub min_size: f32,
    pub size_range: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            burst: PARTICLE_BURST,
            speed: PARTICLE_SPEED,
            decay: PARTICLE_DECAY,
            min_size: PARTICLE_MIN_SIZE,
            size_range: PARTICLE_SIZE_RANGE,
        }
    }
}

/// Lives, scoring and short-lived timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesTuning {
    pub max_lives: u8,
    pub kill_points: u64,
    pub survival_points: u64,
    pub survival_interval_ms: f64,
    /// Invincibility window after losing a life
    pub recovery_ms: f64,
    /// How long notification banners stay up
    pub banner_ms: f64,
}

impl Default for RulesTuning {
    fn default() -> Self {
        Self {
            max_lives: MAX_LIVES,
            kill_points: KILL_POINTS,
            survival_points: SURVIVAL_POINTS,
            survival_interval_ms: SURVIVAL_INTERVAL_MS,
            recovery_ms: RECOVERY_MS,
            banner_ms: BANNER_MS,
        }
    }
}

/// Difficulty ramp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub interval_ms: f64,
    pub initial_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub spawn_interval_factor: f64,
    pub initial_hazards_per_spawn: u32,
    pub max_hazards_per_spawn: u32,
    pub initial_fire_frequency_ms: f64,
    pub min_fire_frequency_ms: f64,
    pub fire_frequency_factor: f64,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            interval_ms: DIFFICULTY_INTERVAL_MS,
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_factor: SPAWN_INTERVAL_FACTOR,
            initial_hazards_per_spawn: INITIAL_HAZARDS_PER_SPAWN,
            max_hazards_per_spawn: MAX_HAZARDS_PER_SPAWN,
            initial_fire_frequency_ms: INITIAL_FIRE_FREQUENCY_MS,
            min_fire_frequency_ms: MIN_FIRE_FREQUENCY_MS,
            fire_frequency_factor: FIRE_FREQUENCY_FACTOR,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field: FieldTuning,
    pub craft: CraftTuning,
    pub hazard: HazardTuning,
    pub projectile: ProjectileTuning,
    pub pickup: PickupTuning,
    pub particles: ParticleTuning,
    pub rules: RulesTuning,
    pub difficulty: DifficultyTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON balance sheet and repair bad values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Serialize to pretty JSON (for dumping the defaults)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Repair values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if !(self.field.width > 0.0 && self.field.height > 0.0) {
            log::warn!(
                "Invalid field size {}x{}, using defaults",
                self.field.width,
                self.field.height
            );
            self.field = defaults.field.clone();
        }

        // Hazards must always move left
        if !(self.hazard.min_speed > 0.0) {
            log::warn!(
                "Hazard min_speed {} must be positive, using {}",
                self.hazard.min_speed,
                HAZARD_MIN_SPEED
            );
            self.hazard.min_speed = HAZARD_MIN_SPEED;
        }
        if self.hazard.max_speed < self.hazard.min_speed {
            log::warn!(
                "Hazard max_speed {} below min_speed, clamping",
                self.hazard.max_speed
            );
            self.hazard.max_speed = self.hazard.min_speed;
        }

        if !(1..=MAX_LIVES).contains(&self.rules.max_lives) {
            let clamped = self.rules.max_lives.clamp(1, MAX_LIVES);
            log::warn!(
                "max_lives {} out of 1..={}, using {}",
                self.rules.max_lives,
                MAX_LIVES,
                clamped
            );
            self.rules.max_lives = clamped;
        }

        if self.pickup.kill_milestone == 0 {
            log::warn!("kill_milestone must be at least 1, using {}", KILL_MILESTONE);
            self.pickup.kill_milestone = KILL_MILESTONE;
        }

        let d = &mut self.difficulty;
        if !(d.interval_ms > 0.0) {
            log::warn!("Difficulty interval must be positive, using default");
            d.interval_ms = DIFFICULTY_INTERVAL_MS;
        }
        // Factors outside (0, 1] would loosen difficulty instead of tightening it
        if !(d.spawn_interval_factor > 0.0 && d.spawn_interval_factor <= 1.0) {
            log::warn!("spawn_interval_factor {} out of range", d.spawn_interval_factor);
            d.spawn_interval_factor = SPAWN_INTERVAL_FACTOR;
        }
        if !(d.fire_frequency_factor > 0.0 && d.fire_frequency_factor <= 1.0) {
            log::warn!("fire_frequency_factor {} out of range", d.fire_frequency_factor);
            d.fire_frequency_factor = FIRE_FREQUENCY_FACTOR;
        }
        if d.max_hazards_per_spawn < d.initial_hazards_per_spawn {
            d.max_hazards_per_spawn = d.initial_hazards_per_spawn;
        }
        if d.min_spawn_interval_ms > d.initial_spawn_interval_ms {
            d.min_spawn_interval_ms = d.initial_spawn_interval_ms;
        }
        if d.min_fire_frequency_ms > d.initial_fire_frequency_ms {
            d.min_fire_frequency_ms = d.initial_fire_frequency_ms;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "craft": { "gravity": 0.7 } }"#).unwrap();
        assert!((tuning.craft.gravity - 0.7).abs() < f32::EPSILON);
        assert_eq!(tuning.craft.width, CRAFT_WIDTH);
        assert_eq!(tuning.field, FieldTuning::default());
        assert_eq!(tuning.difficulty, DifficultyTuning::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(Tuning::from_json("{}").unwrap(), Tuning::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Tuning::from_json("{ craft: ").is_err());
    }

    #[test]
    fn test_sanitize_non_positive_hazard_speed() {
        let tuning =
            Tuning::from_json(r#"{ "hazard": { "min_speed": -1.0, "max_speed": 0.0 } }"#).unwrap();
        assert!(tuning.hazard.min_speed > 0.0);
        assert!(tuning.hazard.max_speed >= tuning.hazard.min_speed);
    }

    #[test]
    fn test_sanitize_loosening_factor() {
        let tuning =
            Tuning::from_json(r#"{ "difficulty": { "spawn_interval_factor": 1.5 } }"#).unwrap();
        assert_eq!(tuning.difficulty.spawn_interval_factor, SPAWN_INTERVAL_FACTOR);
    }

    #[test]
    fn test_sanitize_clamps_max_lives() {
        let tuning = Tuning::from_json(r#"{ "rules": { "max_lives": 9 } }"#).unwrap();
        assert_eq!(tuning.rules.max_lives, MAX_LIVES);

        let tuning = Tuning::from_json(r#"{ "rules": { "max_lives": 0 } }"#).unwrap();
        assert_eq!(tuning.rules.max_lives, 1);

        let tuning = Tuning::from_json(r#"{ "rules": { "max_lives": 2 } }"#).unwrap();
        assert_eq!(tuning.rules.max_lives, 2);
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
