//! Time- and score-gated spawning
//!
//! Asteroids enter from just outside a random arena edge; a power-up appears
//! probabilistically while none exists in the world; a destroyed asteroid
//! above the minimum radius breaks into two half-radius children.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Arena, Asteroid, PowerUp, SimState};
use crate::consts::*;

/// Difficulty-scaled asteroid cap: base cap plus one per score step
pub fn asteroid_cap(score: u32) -> usize {
    MAX_ASTEROIDS + (score / DIFFICULTY_SCORE_STEP) as usize
}

/// Run both spawners for the current tick
pub fn run(state: &mut SimState, score: u32) {
    let since_last = state.time_ticks - state.last_asteroid_spawn_tick;
    if since_last >= ASTEROID_SPAWN_INTERVAL_TICKS && state.asteroids.len() < asteroid_cap(score) {
        let asteroid = edge_asteroid(&state.arena, &mut state.rng);
        log::debug!(
            "spawned asteroid at ({:.1}, {:.1}), {} in world",
            asteroid.pos.x,
            asteroid.pos.y,
            state.asteroids.len() + 1
        );
        state.asteroids.push(asteroid);
        state.last_asteroid_spawn_tick = state.time_ticks;
    }

    if state.powerups.len() < POWERUP_MAX_COUNT && state.rng.random_bool(POWERUP_SPAWN_CHANCE) {
        let powerup = drifting_powerup(&state.arena, &mut state.rng);
        log::debug!("spawned power-up at ({:.1}, {:.1})", powerup.pos.x, powerup.pos.y);
        state.powerups.push(powerup);
    }
}

/// New asteroid at an explicit origin with randomized velocity and side count
pub fn random_asteroid(pos: Vec2, radius: f32, rng: &mut Pcg32) -> Asteroid {
    let vel = Vec2::new(
        rng.random_range(-0.5..0.5),
        rng.random_range(-0.5..0.5),
    ) * ASTEROID_SPEED_SCALE;
    Asteroid {
        pos,
        vel,
        radius,
        sides: rng.random_range(ASTEROID_MIN_SIDES..=ASTEROID_MAX_SIDES),
    }
}

/// Default-size asteroid at a random point just outside one of the four edges
pub fn edge_asteroid(arena: &Arena, rng: &mut Pcg32) -> Asteroid {
    let radius = ASTEROID_DEFAULT_RADIUS;
    let pos = match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random_range(0.0..arena.width), -radius),
        1 => Vec2::new(arena.width + radius, rng.random_range(0.0..arena.height)),
        2 => Vec2::new(rng.random_range(0.0..arena.width), arena.height + radius),
        _ => Vec2::new(-radius, rng.random_range(0.0..arena.height)),
    };
    random_asteroid(pos, radius, rng)
}

/// Break a destroyed asteroid into children: exactly two at half the parent's
/// radius when the parent can still split, none otherwise
pub fn split_asteroid(parent: &Asteroid, rng: &mut Pcg32) -> Vec<Asteroid> {
    if !parent.can_split() {
        return Vec::new();
    }
    let half = parent.radius / 2.0;
    vec![
        random_asteroid(parent.pos, half, rng),
        random_asteroid(parent.pos, half, rng),
    ]
}

/// Power-up at a uniform random position inside the arena with slow drift
pub fn drifting_powerup(arena: &Arena, rng: &mut Pcg32) -> PowerUp {
    let pos = Vec2::new(
        rng.random_range(0.0..arena.width),
        rng.random_range(0.0..arena.height),
    );
    let vel = Vec2::new(
        rng.random_range(-POWERUP_DRIFT_SPEED..POWERUP_DRIFT_SPEED),
        rng.random_range(-POWERUP_DRIFT_SPEED..POWERUP_DRIFT_SPEED),
    );
    PowerUp {
        pos,
        vel,
        radius: POWERUP_RADIUS,
    }
}
