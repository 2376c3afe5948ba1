//! Deadline-keyed registry of timed effects
//!
//! Entries are serviced once per frame: anything whose deadline has passed is
//! handed back to the caller, which applies the revert. Every entry carries
//! the session generation it was registered in; `reset` bumps the generation
//! so nothing from an earlier session can revert into a fresh one.

use serde::{Deserialize, Serialize};

use super::effects::TimedEffect;

/// One pending timed effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: TimedEffect,
    /// Absolute deadline (ms on the session clock)
    pub expires_at_ms: f64,
    pub generation: u32,
}

/// Display row for the active-effects list
#[derive(Debug, Clone, PartialEq)]
pub struct EffectEntry {
    pub label: &'static str,
    /// Whole seconds left, rounded up
    pub remaining_secs: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectRegistry {
    entries: Vec<ActiveEffect>,
    generation: u32,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Start a new session: every pending timer becomes stale
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.entries.clear();
    }

    /// Record an effect expiring at `now_ms + duration_ms`
    pub fn register(&mut self, kind: TimedEffect, now_ms: f64, duration_ms: f64) {
        self.entries.push(ActiveEffect {
            kind,
            expires_at_ms: now_ms + duration_ms,
            generation: self.generation,
        });
    }

    /// Number of live entries of this kind in the current generation
    pub fn count(&self, kind: TimedEffect) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == kind && e.generation == self.generation)
            .count()
    }

    pub fn is_active(&self, kind: TimedEffect) -> bool {
        self.count(kind) > 0
    }

    /// Any live entry that keeps the craft invincible
    pub fn grants_invincibility(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.generation == self.generation && e.kind.grants_invincibility())
    }

    /// Remove every entry due at `now_ms` and return the current-generation ones
    ///
    /// Stale entries are dropped without being returned. Each returned entry
    /// removes only itself; other entries of the same kind stay pending.
    pub fn expire(&mut self, now_ms: f64) -> Vec<ActiveEffect> {
        let generation = self.generation;
        let mut due = Vec::new();
        self.entries.retain(|e| {
            if e.generation != generation {
                log::debug!("Dropping stale timer {:?} from generation {}", e.kind, e.generation);
                return false;
            }
            if e.expires_at_ms <= now_ms {
                due.push(e.clone());
                return false;
            }
            true
        });
        due.sort_by(|a, b| a.expires_at_ms.total_cmp(&b.expires_at_ms));
        due
    }

    /// Displayed entries with their remaining whole seconds
    pub fn active_entries(&self, now_ms: f64) -> Vec<EffectEntry> {
        self.entries
            .iter()
            .filter(|e| e.generation == self.generation && e.kind.is_displayed())
            .map(|e| EffectEntry {
                label: e.kind.label(),
                remaining_secs: ((e.expires_at_ms - now_ms) / 1000.0).ceil() as i64,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_at_deadline() {
        let mut reg = EffectRegistry::new();
        reg.register(TimedEffect::Shield, 1000.0, 5000.0);

        assert!(reg.expire(5999.0).is_empty());
        assert!(reg.is_active(TimedEffect::Shield));

        let due = reg.expire(6000.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].kind, TimedEffect::Shield);
        assert!(!reg.is_active(TimedEffect::Shield));
        assert!(reg.active_entries(6000.0).is_empty());
    }

    #[test]
    fn test_remaining_secs_rounds_up() {
        let mut reg = EffectRegistry::new();
        reg.register(TimedEffect::RapidFire, 0.0, 5000.0);

        assert_eq!(reg.active_entries(0.0)[0].remaining_secs, 5);
        assert_eq!(reg.active_entries(100.0)[0].remaining_secs, 5);
        assert_eq!(reg.active_entries(4001.0)[0].remaining_secs, 1);
    }

    #[test]
    fn test_duplicates_expire_independently() {
        let mut reg = EffectRegistry::new();
        reg.register(TimedEffect::RapidFire, 0.0, 5000.0);
        reg.register(TimedEffect::RapidFire, 3000.0, 5000.0);
        assert_eq!(reg.count(TimedEffect::RapidFire), 2);

        // First expiry removes only its own entry
        assert_eq!(reg.expire(5000.0).len(), 1);
        assert_eq!(reg.count(TimedEffect::RapidFire), 1);
        assert_eq!(reg.active_entries(5000.0).len(), 1);

        assert_eq!(reg.expire(8000.0).len(), 1);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_reset_invalidates_pending() {
        let mut reg = EffectRegistry::new();
        reg.register(TimedEffect::HeavyShip, 0.0, 5000.0);
        let generation = reg.generation();

        reg.reset();
        assert_ne!(reg.generation(), generation);
        assert!(reg.expire(10_000.0).is_empty());
    }

    #[test]
    fn test_recovery_hidden_but_grants_invincibility() {
        let mut reg = EffectRegistry::new();
        reg.register(TimedEffect::Recovery, 0.0, 2000.0);
        assert!(reg.grants_invincibility());
        assert!(reg.active_entries(0.0).is_empty());
    }
}
