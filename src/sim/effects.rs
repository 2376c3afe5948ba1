//! Pickup effect catalog and timed modifiers

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Whether a pickup effect helps or hurts the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectCategory {
    Beneficial,
    Harmful,
}

/// One entry of the mystery pickup catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupEffect {
    ExtraLife,
    Shield,
    RapidFire,
    LoseLife,
    ReverseControls,
    HeavyShip,
}

impl PickupEffect {
    /// The full catalog, in roll order
    pub const ALL: [PickupEffect; 6] = [
        PickupEffect::ExtraLife,
        PickupEffect::Shield,
        PickupEffect::RapidFire,
        PickupEffect::LoseLife,
        PickupEffect::ReverseControls,
        PickupEffect::HeavyShip,
    ];

    /// Uniform pick from the catalog
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn category(&self) -> EffectCategory {
        match self {
            PickupEffect::ExtraLife | PickupEffect::Shield | PickupEffect::RapidFire => {
                EffectCategory::Beneficial
            }
            PickupEffect::LoseLife | PickupEffect::ReverseControls | PickupEffect::HeavyShip => {
                EffectCategory::Harmful
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PickupEffect::ExtraLife => "Extra Life",
            PickupEffect::Shield => "Shield",
            PickupEffect::RapidFire => "Rapid Fire",
            PickupEffect::LoseLife => "Lose Life",
            PickupEffect::ReverseControls => "Reverse Controls",
            PickupEffect::HeavyShip => "Heavy Ship",
        }
    }

    /// The timed modifier this effect starts, if any
    pub fn timed(&self) -> Option<TimedEffect> {
        match self {
            PickupEffect::Shield => Some(TimedEffect::Shield),
            PickupEffect::RapidFire => Some(TimedEffect::RapidFire),
            PickupEffect::ReverseControls => Some(TimedEffect::ReverseControls),
            PickupEffect::HeavyShip => Some(TimedEffect::HeavyShip),
            PickupEffect::ExtraLife | PickupEffect::LoseLife => None,
        }
    }
}

/// A modifier that reverts on its own after a fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimedEffect {
    /// Post-hit invincibility window
    Recovery,
    Shield,
    RapidFire,
    ReverseControls,
    HeavyShip,
}

impl TimedEffect {
    pub fn label(&self) -> &'static str {
        match self {
            TimedEffect::Recovery => "Recovery",
            TimedEffect::Shield => "Shield",
            TimedEffect::RapidFire => "Rapid Fire",
            TimedEffect::ReverseControls => "Reverse",
            TimedEffect::HeavyShip => "Heavy",
        }
    }

    /// Shown in the active-effects list (the recovery blink is not)
    pub fn is_displayed(&self) -> bool {
        !matches!(self, TimedEffect::Recovery)
    }

    /// Keeps the craft invincible while active
    pub fn grants_invincibility(&self) -> bool {
        matches!(self, TimedEffect::Recovery | TimedEffect::Shield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_catalog_split() {
        let good = PickupEffect::ALL
            .iter()
            .filter(|e| e.category() == EffectCategory::Beneficial)
            .count();
        assert_eq!(good, 3);
        assert_eq!(PickupEffect::ALL.len() - good, 3);
    }

    #[test]
    fn test_roll_covers_catalog() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(PickupEffect::roll(&mut rng));
        }
        assert_eq!(seen.len(), PickupEffect::ALL.len());
    }

    #[test]
    fn test_instant_effects_have_no_timer() {
        assert_eq!(PickupEffect::ExtraLife.timed(), None);
        assert_eq!(PickupEffect::LoseLife.timed(), None);
        assert_eq!(PickupEffect::Shield.timed(), Some(TimedEffect::Shield));
    }
}
