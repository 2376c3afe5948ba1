//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only from the `now_ms` the host passes in
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod entities;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{Rect, overlaps};
pub use effects::{EffectCategory, PickupEffect, TimedEffect};
pub use entities::{Craft, Hazard, Particle, Pickup, Projectile, Side};
pub use session::{Hud, Session, Summary};
pub use spawner::{Difficulty, Spawner, is_pickup_milestone};
pub use state::{Banner, GameEvent, GamePhase, GameState, RngState};
pub use tick::tick;
pub use timers::{ActiveEffect, EffectEntry, EffectRegistry};
