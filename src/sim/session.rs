//! Session lifecycle and the host-facing surface of the simulation
//!
//! The host feeds in the two input signals and one `frame` call per display
//! refresh, and reads plain values back out for its own UI.

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::tick;
use super::timers::EffectEntry;
use crate::tuning::Tuning;

/// Live counters for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub kills: u32,
    pub lives: u8,
    pub max_lives: u8,
}

/// Final result of an ended session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub score: u64,
    pub kills: u32,
}

/// One player's game: owns the state and gates input on the phase
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, tuning),
        }
    }

    /// Start, or restart from scratch; works from any phase
    pub fn on_start_command(&mut self, now_ms: f64) {
        self.state.start(now_ms);
    }

    /// One lift press; ignored unless a session is running
    pub fn on_lift_signal(&mut self) {
        if self.state.phase == GamePhase::Running {
            self.state.craft.apply_lift();
        }
    }

    /// Advance one frame; returns whether the host should schedule another
    pub fn frame(&mut self, now_ms: f64) -> bool {
        tick(&mut self.state, now_ms);
        self.is_running()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Running
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.state.score,
            kills: self.state.kills,
            lives: self.state.lives,
            max_lives: self.state.tuning.rules.max_lives,
        }
    }

    /// Final score and kills, once the session has ended
    pub fn summary(&self) -> Option<Summary> {
        match self.state.phase {
            GamePhase::Ended => Some(Summary {
                score: self.state.score,
                kills: self.state.kills,
            }),
            _ => None,
        }
    }

    /// Timed effects to list on screen
    pub fn active_effects(&self, now_ms: f64) -> Vec<EffectEntry> {
        self.state.effects.active_entries(now_ms)
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}
