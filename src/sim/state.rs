//! Simulation state and entity records
//!
//! Everything the tick function reads or writes lives here. The state is
//! deterministic and serializable: fixed timestep, seeded RNG, no platform
//! dependencies. The session layer owns one `SimState` while a game is in
//! progress and drops it on leaving play.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Arena bounds; entities wrap or despawn at these edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_MAX_WIDTH,
            height: ARENA_MAX_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fit the arena to a viewport: `min(viewport - margin, cap)` per axis
    pub fn fit_viewport(viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            width: (viewport_w - ARENA_VIEWPORT_MARGIN).min(ARENA_MAX_WIDTH),
            height: (viewport_h - ARENA_VIEWPORT_MARGIN).min(ARENA_MAX_HEIGHT),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if a point lies inside `[0, width) × [0, height)`
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x < self.width && pos.y >= 0.0 && pos.y < self.height
    }
}

/// The player's ship (exactly one per active session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading in radians; allowed to drift outside [0, 2π), only trig reads it
    pub heading: f32,
    pub vel: Vec2,
    /// Turn signal for the current tick (-1.0, 0.0, +1.0)
    pub turn: f32,
    /// Thrust signal for the current tick (-1.0 ..= 1.0)
    pub thrust: f32,
    pub radius: f32,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            heading: -std::f32::consts::FRAC_PI_2, // facing up
            vel: Vec2::ZERO,
            turn: 0.0,
            thrust: 0.0,
            radius: SHIP_RADIUS,
        }
    }

    /// Reposition at the arena center after a life is lost; the ship record
    /// itself survives, only its motion state resets
    pub fn reset(&mut self, arena: &Arena) {
        self.pos = arena.center();
        self.vel = Vec2::ZERO;
        self.heading = -std::f32::consts::FRAC_PI_2;
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Polygon side count, visual variety only
    pub sides: u32,
}

impl Asteroid {
    /// Asteroids at or below the minimum radius are deleted without children
    pub fn can_split(&self) -> bool {
        self.radius > ASTEROID_MIN_SPLIT_RADIUS
    }
}

/// A ship-fired bullet; despawns at the arena edge rather than wrapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// A collectible rapid-fire power-up drifting through the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// The single active temporary buff; collecting another restarts the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpEffect {
    pub active: bool,
    pub expires_at_tick: u64,
}

impl PowerUpEffect {
    /// Start (or restart) the rapid-fire window; no duration stacking
    pub fn activate(&mut self, now: u64) {
        self.active = true;
        self.expires_at_tick = now + POWERUP_DURATION_TICKS;
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.expires_at_tick = 0;
    }

    /// Effective fire cooldown in ticks
    pub fn fire_cooldown(&self) -> u64 {
        if self.active {
            BOOSTED_FIRE_COOLDOWN_TICKS
        } else {
            FIRE_COOLDOWN_TICKS
        }
    }
}

/// Discrete outcome of one tick, folded into score/lives/phase by the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    /// An asteroid was destroyed by a bullet; `children` is 0 or 2
    AsteroidDestroyed { pos: Vec2, children: u8 },
    /// The ship collided with an asteroid and was reset to center
    ShipHit,
    PowerUpCollected,
    PowerUpExpired,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    /// Simulation tick counter; the only clock the core reads
    pub time_ticks: u64,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub powerups: Vec<PowerUp>,
    pub effect: PowerUpEffect,
    pub last_asteroid_spawn_tick: u64,
    /// Tick of the most recent shot; `None` until the first shot
    pub last_shot_tick: Option<u64>,
}

impl SimState {
    pub fn new(seed: u64, arena: Arena) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            time_ticks: 0,
            ship: Ship::new(arena.center()),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            effect: PowerUpEffect::default(),
            last_asteroid_spawn_tick: 0,
            last_shot_tick: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_fit_viewport_clamps_to_cap() {
        let small = Arena::fit_viewport(400.0, 300.0);
        assert_eq!(small.width, 400.0 - ARENA_VIEWPORT_MARGIN);
        assert_eq!(small.height, 300.0 - ARENA_VIEWPORT_MARGIN);

        let large = Arena::fit_viewport(2000.0, 1500.0);
        assert_eq!(large.width, ARENA_MAX_WIDTH);
        assert_eq!(large.height, ARENA_MAX_HEIGHT);
    }

    #[test]
    fn effect_restart_does_not_stack() {
        let mut effect = PowerUpEffect::default();
        effect.activate(0);
        assert_eq!(effect.expires_at_tick, POWERUP_DURATION_TICKS);

        // Collecting a second power-up mid-window restarts, never extends past
        // now + duration
        effect.activate(100);
        assert_eq!(effect.expires_at_tick, 100 + POWERUP_DURATION_TICKS);
    }

    #[test]
    fn effect_switches_fire_cooldown() {
        let mut effect = PowerUpEffect::default();
        assert_eq!(effect.fire_cooldown(), FIRE_COOLDOWN_TICKS);
        effect.activate(0);
        assert_eq!(effect.fire_cooldown(), BOOSTED_FIRE_COOLDOWN_TICKS);
        effect.clear();
        assert_eq!(effect.fire_cooldown(), FIRE_COOLDOWN_TICKS);
    }

    #[test]
    fn ship_reset_recenters_with_zero_velocity() {
        let arena = Arena::default();
        let mut ship = Ship::new(Vec2::new(10.0, 10.0));
        ship.vel = Vec2::new(3.0, -2.0);
        ship.heading = 1.0;

        ship.reset(&arena);
        assert_eq!(ship.pos, arena.center());
        assert_eq!(ship.vel, Vec2::ZERO);
        assert_eq!(ship.heading, -std::f32::consts::FRAC_PI_2);
    }
}
