//! Collision detection and resolution
//!
//! Every entity is a circle for hit-testing purposes. Resolution runs after
//! integration each tick, iterating lists from the end backward so in-place
//! removal never skips an element, and resolving every simultaneous hit
//! rather than stopping at the first.

use glam::Vec2;

use super::spawn::split_asteroid;
use super::state::{GameEvent, SimState};

/// True iff the Euclidean distance between centers is strictly less than the
/// sum of the radii. Exact tangency is not an overlap.
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let sum = a_radius + b_radius;
    a_pos.distance_squared(b_pos) < sum * sum
}

/// Resolve all pairwise interactions for the current tick
///
/// Order: ship↔asteroid, bullet↔asteroid, ship↔power-up. Score and lives are
/// not touched here; the emitted events carry those outcomes to the session.
pub fn resolve(state: &mut SimState, events: &mut Vec<GameEvent>) {
    // Ship vs asteroids: the asteroid is deleted outright (no split) and the
    // ship snaps back to center
    for i in (0..state.asteroids.len()).rev() {
        let asteroid = &state.asteroids[i];
        if circles_overlap(state.ship.pos, state.ship.radius, asteroid.pos, asteroid.radius) {
            state.asteroids.remove(i);
            state.ship.reset(&state.arena);
            events.push(GameEvent::ShipHit);
            log::debug!("ship hit by asteroid, reset to center");
        }
    }

    // Bullets vs asteroids: each bullet destroys at most one asteroid
    'bullets: for b in (0..state.bullets.len()).rev() {
        for a in (0..state.asteroids.len()).rev() {
            let bullet = &state.bullets[b];
            let asteroid = &state.asteroids[a];
            if circles_overlap(bullet.pos, bullet.radius, asteroid.pos, asteroid.radius) {
                state.bullets.remove(b);
                let parent = state.asteroids.remove(a);
                let children = split_asteroid(&parent, &mut state.rng);
                let count = children.len() as u8;
                state.asteroids.extend(children);
                events.push(GameEvent::AsteroidDestroyed {
                    pos: parent.pos,
                    children: count,
                });
                continue 'bullets;
            }
        }
    }

    // Ship vs power-ups: collection restarts the rapid-fire window
    for i in (0..state.powerups.len()).rev() {
        let powerup = &state.powerups[i];
        if circles_overlap(state.ship.pos, state.ship.radius, powerup.pos, powerup.radius) {
            state.powerups.remove(i);
            state.effect.activate(state.time_ticks);
            events.push(GameEvent::PowerUpCollected);
        }
    }
}
