//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one 60 Hz step. The function is
//! pure with respect to the outside world: it reads the per-tick input,
//! mutates the passed-in state, and returns the discrete events the session
//! layer folds into score, lives, and phase transitions. It is callable
//! identically from the real frame driver or from a deterministic test.

use glam::Vec2;

use super::state::{GameEvent, SimState};
use super::{collision, spawn};
use crate::consts::*;
use crate::{wrap_coordinate, wrap_with_margin};

/// Control signals for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Turn axis: -1.0 (counter-clockwise) ..= 1.0 (clockwise)
    pub turn: f32,
    /// Thrust axis: -1.0 (reverse) ..= 1.0 (forward)
    pub thrust: f32,
    /// Fire key held; gated by the effective cooldown
    pub fire: bool,
}

/// Advance the simulation by one fixed timestep
///
/// Order: power-up expiry, spawning, ship integration and wrap, firing,
/// bullet integration with edge despawn, asteroid/power-up integration with
/// margin wrap, collision resolution. `score` feeds the spawner's difficulty
/// cap; the score itself is owned by the session.
pub fn tick(state: &mut SimState, input: &TickInput, score: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    // Power-up expiry. The tick clock is the single source of truth; there is
    // no parallel real-time timer to race with.
    if state.effect.active && state.time_ticks >= state.effect.expires_at_tick {
        state.effect.clear();
        events.push(GameEvent::PowerUpExpired);
    }

    spawn::run(state, score);

    // Ship integration: the mapper's control signals land on the ship record,
    // then turn, thrust along the heading, friction, and displacement apply
    // in that order.
    let ship = &mut state.ship;
    ship.turn = input.turn.clamp(-1.0, 1.0);
    ship.thrust = input.thrust.clamp(-1.0, 1.0);
    ship.heading += ship.turn * SHIP_TURN_STEP;
    let forward = Vec2::new(ship.heading.cos(), ship.heading.sin());
    ship.vel += forward * (ship.thrust * SHIP_THRUST);
    ship.vel *= SHIP_FRICTION;
    ship.pos += ship.vel;

    // Ship wraps across all four edges
    state.ship.pos.x = wrap_coordinate(state.ship.pos.x, state.arena.width);
    state.ship.pos.y = wrap_coordinate(state.ship.pos.y, state.arena.height);

    if input.fire {
        try_fire(state, &mut events);
    }

    // Bullets fly straight and despawn at the arena edge; no wrap
    for i in (0..state.bullets.len()).rev() {
        let vel = state.bullets[i].vel;
        state.bullets[i].pos += vel;
        if !state.arena.contains(state.bullets[i].pos) {
            state.bullets.remove(i);
        }
    }

    // Asteroids and power-ups wrap with a margin of their own radius so they
    // fully exit one side before reappearing on the other
    for asteroid in &mut state.asteroids {
        asteroid.pos += asteroid.vel;
        asteroid.pos.x = wrap_with_margin(asteroid.pos.x, state.arena.width, asteroid.radius);
        asteroid.pos.y = wrap_with_margin(asteroid.pos.y, state.arena.height, asteroid.radius);
    }
    for powerup in &mut state.powerups {
        powerup.pos += powerup.vel;
        powerup.pos.x = wrap_with_margin(powerup.pos.x, state.arena.width, powerup.radius);
        powerup.pos.y = wrap_with_margin(powerup.pos.y, state.arena.height, powerup.radius);
    }

    collision::resolve(state, &mut events);

    events
}

/// Create a bullet at the ship's nose if the cooldown has elapsed
fn try_fire(state: &mut SimState, events: &mut Vec<GameEvent>) {
    let cooldown = state.effect.fire_cooldown();
    let ready = state
        .last_shot_tick
        .map_or(true, |last| state.time_ticks - last >= cooldown);
    if !ready {
        return;
    }

    let forward = Vec2::new(state.ship.heading.cos(), state.ship.heading.sin());
    state.bullets.push(super::state::Bullet {
        pos: state.ship.pos + forward * state.ship.radius,
        vel: forward * BULLET_SPEED,
        radius: BULLET_RADIUS,
    });
    state.last_shot_tick = Some(state.time_ticks);
    events.push(GameEvent::ShotFired);
}
