//! Hazard spawning and difficulty progression

use serde::{Deserialize, Serialize};

use crate::tuning::DifficultyTuning;

/// Shared spawn/fire parameters, tightened over time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Number of tightening steps applied so far
    pub level: u32,
    pub spawn_interval_ms: f64,
    pub hazards_per_spawn: u32,
    /// Hostile fire cooldown threshold
    pub fire_frequency_ms: f64,
    /// Session time of the last tightening step (or session start)
    pub last_step_ms: f64,
}

impl Difficulty {
    pub fn new(tuning: &DifficultyTuning, now_ms: f64) -> Self {
        Self {
            level: 0,
            spawn_interval_ms: tuning.initial_spawn_interval_ms,
            hazards_per_spawn: tuning.initial_hazards_per_spawn,
            fire_frequency_ms: tuning.initial_fire_frequency_ms,
            last_step_ms: now_ms,
        }
    }

    /// One tightening step, each parameter clamped to its bound
    pub fn tighten(&mut self, tuning: &DifficultyTuning) {
        self.level += 1;
        self.spawn_interval_ms = (self.spawn_interval_ms * tuning.spawn_interval_factor)
            .max(tuning.min_spawn_interval_ms);
        self.hazards_per_spawn = (self.hazards_per_spawn + 1).min(tuning.max_hazards_per_spawn);
        self.fire_frequency_ms = (self.fire_frequency_ms * tuning.fire_frequency_factor)
            .max(tuning.min_fire_frequency_ms);
    }

    /// Tighten once if a full interval has passed since the last step;
    /// returns whether it did
    pub fn update(&mut self, now_ms: f64, tuning: &DifficultyTuning) -> bool {
        if now_ms - self.last_step_ms >= tuning.interval_ms {
            self.tighten(tuning);
            self.last_step_ms = now_ms;
            log::info!(
                "Difficulty up (level {}): spawn every {:.0}ms x{}, fire every {:.0}ms",
                self.level,
                self.spawn_interval_ms,
                self.hazards_per_spawn,
                self.fire_frequency_ms
            );
            return true;
        }
        false
    }
}

/// Time accumulator that releases hazard waves
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    pub accumulator_ms: f64,
}

impl Spawner {
    /// Advance by one frame; returns how many hazards to create now
    pub fn advance(&mut self, dt_ms: f64, difficulty: &Difficulty) -> u32 {
        self.accumulator_ms += dt_ms;
        if self.accumulator_ms >= difficulty.spawn_interval_ms {
            self.accumulator_ms = 0.0;
            return difficulty.hazards_per_spawn;
        }
        0
    }
}

/// A pickup drops when the kill count lands on a positive multiple of the
/// milestone
#[inline]
pub fn is_pickup_milestone(kills: u32, milestone: u32) -> bool {
    kills > 0 && milestone > 0 && kills.is_multiple_of(milestone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawner_releases_wave_at_interval() {
        let tuning = DifficultyTuning::default();
        let difficulty = Difficulty::new(&tuning, 0.0);
        let mut spawner = Spawner::default();

        assert_eq!(spawner.advance(1000.0, &difficulty), 0);
        assert_eq!(spawner.advance(999.0, &difficulty), 0);
        assert_eq!(spawner.advance(1.0, &difficulty), 1);
        assert_eq!(spawner.accumulator_ms, 0.0);
    }

    #[test]
    fn test_difficulty_steps_every_interval() {
        let tuning = DifficultyTuning::default();
        let mut difficulty = Difficulty::new(&tuning, 1000.0);

        assert!(!difficulty.update(30_999.0, &tuning));
        assert!(difficulty.update(31_000.0, &tuning));
        assert_eq!(difficulty.level, 1);
        assert!((difficulty.spawn_interval_ms - 1700.0).abs() < 1e-9);
        assert_eq!(difficulty.hazards_per_spawn, 2);
        assert!((difficulty.fire_frequency_ms - 1800.0).abs() < 1e-9);

        // Interval restarts from the step
        assert!(!difficulty.update(60_000.0, &tuning));
        assert!(difficulty.update(61_000.0, &tuning));
    }

    #[test]
    fn test_difficulty_bounds() {
        let tuning = DifficultyTuning::default();
        let mut difficulty = Difficulty::new(&tuning, 0.0);
        for _ in 0..100 {
            difficulty.tighten(&tuning);
        }
        assert_eq!(difficulty.spawn_interval_ms, 500.0);
        assert_eq!(difficulty.hazards_per_spawn, 5);
        assert_eq!(difficulty.fire_frequency_ms, 800.0);
    }

    #[test]
    fn test_pickup_milestone() {
        assert!(!is_pickup_milestone(0, 10));
        assert!(!is_pickup_milestone(9, 10));
        assert!(is_pickup_milestone(10, 10));
        assert!(!is_pickup_milestone(11, 10));
        assert!(is_pickup_milestone(30, 10));
    }

    proptest! {
        #[test]
        fn prop_difficulty_closed_form(n in 0u32..60) {
            let tuning = DifficultyTuning::default();
            let mut difficulty = Difficulty::new(&tuning, 0.0);
            let mut prev = difficulty.clone();
            for _ in 0..n {
                difficulty.tighten(&tuning);
                prop_assert!(difficulty.spawn_interval_ms <= prev.spawn_interval_ms);
                prop_assert!(difficulty.hazards_per_spawn >= prev.hazards_per_spawn);
                prop_assert!(difficulty.fire_frequency_ms <= prev.fire_frequency_ms);
                prev = difficulty.clone();
            }

            let expected_interval = (2000.0 * 0.85f64.powi(n as i32)).max(500.0);
            let expected_count = (1 + n).min(5);
            let expected_fire = (2000.0 * 0.9f64.powi(n as i32)).max(800.0);
            prop_assert!((difficulty.spawn_interval_ms - expected_interval).abs() < 1e-6);
            prop_assert_eq!(difficulty.hazards_per_spawn, expected_count);
            prop_assert!((difficulty.fire_frequency_ms - expected_fire).abs() < 1e-6);
        }
    }
}
