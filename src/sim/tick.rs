//! Per-frame simulation step
//!
//! Order within a frame: timers, craft, spawner, hazards, ally fire,
//! hostile fire, pickups, particles, scoring, difficulty. Entities are only
//! marked for removal while iterating; the sweep at the end compacts them.
//! Once the session ends mid-frame nothing after that point runs except the
//! sweep.

use super::collision::overlaps;
use super::effects::EffectCategory;
use super::state::{GameEvent, GamePhase, GameState, HAZARD_COLOR};

/// Advance a running session to `now_ms`; a no-op in any other phase
pub fn tick(state: &mut GameState, now_ms: f64) {
    if state.phase != GamePhase::Running {
        return;
    }

    // A clock that steps backwards integrates nothing
    let dt = (now_ms - state.last_frame_ms).max(0.0);
    state.last_frame_ms = now_ms;

    state.service_timers(now_ms);
    run_frame(state, dt, now_ms);
    state.sweep(now_ms);
}

fn is_running(state: &GameState) -> bool {
    state.phase == GamePhase::Running
}

/// Gameplay steps of one frame; stops as soon as the session ends so the
/// final score and kills match the end event
fn run_frame(state: &mut GameState, dt: f64, now_ms: f64) {
    update_craft(state, dt, now_ms);
    if !is_running(state) {
        return;
    }
    spawn_hazards(state, dt);
    update_hazards(state, dt, now_ms);
    if !is_running(state) {
        return;
    }
    update_ally_projectiles(state);
    update_hostile_projectiles(state, now_ms);
    if !is_running(state) {
        return;
    }
    update_pickups(state, now_ms);
    if !is_running(state) {
        return;
    }
    for particle in state.particles.iter_mut() {
        particle.update();
    }
    update_score(state, now_ms);
    update_difficulty(state, now_ms);
}

fn update_craft(state: &mut GameState, dt: f64, now_ms: f64) {
    let result = state
        .craft
        .update(dt, &state.tuning.field, &state.tuning.projectile);
    if result.hit_boundary {
        state.lose_life(now_ms);
    }
    if let Some(shot) = result.shot {
        state.ally_projectiles.push(shot);
    }
}

fn spawn_hazards(state: &mut GameState, dt: f64) {
    let count = state.spawner.advance(dt, &state.difficulty);
    for _ in 0..count {
        state.spawn_hazard();
    }
}

fn update_hazards(state: &mut GameState, dt: f64, now_ms: f64) {
    let fire_frequency = state.difficulty.fire_frequency_ms;

    for i in 0..state.hazards.len() {
        if !is_running(state) {
            break;
        }
        if !state.hazards[i].alive {
            continue;
        }
        if let Some(shot) = state.hazards[i].update(dt, fire_frequency, &state.tuning) {
            state.hostile_projectiles.push(shot);
        }

        let bounds = state.hazards[i].bounds();
        if !state.craft.invincible && overlaps(&state.craft.bounds(), &bounds) {
            state.lose_life(now_ms);
            state.burst(bounds.center(), HAZARD_COLOR);
            state.hazards[i].alive = false;
            continue;
        }

        if state.hazards[i].is_off_screen() {
            state.hazards[i].alive = false;
        }
    }
}

fn update_ally_projectiles(state: &mut GameState) {
    let width = state.tuning.field.width;

    for i in 0..state.ally_projectiles.len() {
        state.ally_projectiles[i].update();
        let bounds = state.ally_projectiles[i].bounds();

        // Newest hazard first; the first hit consumes the projectile
        let hit = state
            .hazards
            .iter()
            .rposition(|h| h.alive && overlaps(&bounds, &h.bounds()));
        if let Some(index) = hit {
            state.ally_projectiles[i].alive = false;
            state.destroy_hazard(index);
            continue;
        }

        if state.ally_projectiles[i].is_off_screen(width) {
            state.ally_projectiles[i].alive = false;
        }
    }
}

fn update_hostile_projectiles(state: &mut GameState, now_ms: f64) {
    for i in 0..state.hostile_projectiles.len() {
        if !is_running(state) {
            break;
        }
        state.hostile_projectiles[i].update();

        let bounds = state.hostile_projectiles[i].bounds();
        if !state.craft.invincible && overlaps(&state.craft.bounds(), &bounds) {
            state.lose_life(now_ms);
            state.hostile_projectiles[i].alive = false;
            continue;
        }

        if state.hostile_projectiles[i].is_off_screen(state.tuning.field.width) {
            state.hostile_projectiles[i].alive = false;
        }
    }
}

fn update_pickups(state: &mut GameState, now_ms: f64) {
    let height = state.tuning.field.height;

    for i in 0..state.pickups.len() {
        if !is_running(state) {
            break;
        }
        state.pickups[i].update();

        if overlaps(&state.craft.bounds(), &state.pickups[i].bounds()) {
            state.pickups[i].alive = false;
            let pickup = state.pickups[i].clone();
            state.activate_pickup(&pickup, now_ms);
            continue;
        }

        if state.pickups[i].is_off_screen(height) {
            state.pickups[i].alive = false;
        }
    }
}

/// Survival bonus every interval of running time
fn update_score(state: &mut GameState, now_ms: f64) {
    let rules = &state.tuning.rules;
    if now_ms - state.last_score_ms >= rules.survival_interval_ms {
        state.score += rules.survival_points;
        state.last_score_ms = now_ms;
    }
}

fn update_difficulty(state: &mut GameState, now_ms: f64) {
    if state.difficulty.update(now_ms, &state.tuning.difficulty) {
        let level = state.difficulty.level;
        state.push_banner("Difficulty Up!", EffectCategory::Harmful, now_ms);
        state.events.push(GameEvent::DifficultyUp { level });
    }
}
