//! Vector Rocks - a screen-wrapping asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning)
//! - `session`: Game state machine that owns the simulation while playing
//! - `input`: Raw key events mapped to per-tick control signals
//! - `render`: Minimal frame-snapshot contract for a display layer
//! - `audio`: Fire-and-forget sound cue triggers
//! - `highscores`: Ranked leaderboard with JSON persistence

pub mod audio;
pub mod highscores;
pub mod input;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use session::{GamePhase, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (60 Hz)
    pub const TICKS_PER_SECOND: u64 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum catch-up ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Convert a duration in milliseconds to whole simulation ticks
    pub const fn ms_to_ticks(ms: u64) -> u64 {
        ms * TICKS_PER_SECOND / 1000
    }

    /// Arena size cap; the live arena is `min(viewport - margin, cap)` per axis
    pub const ARENA_MAX_WIDTH: f32 = 800.0;
    pub const ARENA_MAX_HEIGHT: f32 = 600.0;
    /// Border kept between arena and viewport edge on resize
    pub const ARENA_VIEWPORT_MARGIN: f32 = 40.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    /// Heading change per tick while a turn key is held (radians)
    pub const SHIP_TURN_STEP: f32 = 0.08;
    /// Velocity gained per tick of held thrust (units/tick²)
    pub const SHIP_THRUST: f32 = 0.12;
    /// Per-tick velocity damping factor
    pub const SHIP_FRICTION: f32 = 0.99;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 3.0;
    /// Fixed bullet speed at fire time (units/tick)
    pub const BULLET_SPEED: f32 = 7.0;
    pub const FIRE_COOLDOWN_TICKS: u64 = ms_to_ticks(250);
    /// Cooldown while the rapid-fire power-up is active
    pub const BOOSTED_FIRE_COOLDOWN_TICKS: u64 = ms_to_ticks(100);

    /// Asteroid defaults
    pub const ASTEROID_DEFAULT_RADIUS: f32 = 50.0;
    /// At or below this radius an asteroid no longer splits
    pub const ASTEROID_MIN_SPLIT_RADIUS: f32 = 20.0;
    /// Scales the uniform [-0.5, 0.5] per-axis spawn velocity
    pub const ASTEROID_SPEED_SCALE: f32 = 2.0;
    pub const ASTEROID_SPAWN_INTERVAL_TICKS: u64 = ms_to_ticks(1000);
    /// Visual-only polygon side count range (inclusive)
    pub const ASTEROID_MIN_SIDES: u32 = 5;
    pub const ASTEROID_MAX_SIDES: u32 = 9;
    /// Base asteroid count cap before difficulty scaling
    pub const MAX_ASTEROIDS: usize = 10;
    /// One extra asteroid is allowed per this many points
    pub const DIFFICULTY_SCORE_STEP: u32 = 500;

    /// Power-up defaults
    pub const POWERUP_RADIUS: f32 = 12.0;
    /// Slow random drift speed per axis (units/tick)
    pub const POWERUP_DRIFT_SPEED: f32 = 0.4;
    /// Per-tick spawn probability while none exists in the world
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.001;
    /// World power-up count cap
    pub const POWERUP_MAX_COUNT: usize = 1;
    pub const POWERUP_DURATION_TICKS: u64 = ms_to_ticks(5000);

    /// Session defaults
    pub const START_LIVES: u32 = 3;
    pub const SCORE_PER_ASTEROID: u32 = 10;
}

/// Wrap a coordinate into `[0, max)` (exit one side, re-enter the opposite)
#[inline]
pub fn wrap_coordinate(value: f32, max: f32) -> f32 {
    let wrapped = value.rem_euclid(max);
    // rem_euclid rounds back to `max` itself for tiny negative inputs
    if wrapped >= max { 0.0 } else { wrapped }
}

/// Wrap with a margin so a body fully exits before reappearing on the far side
#[inline]
pub fn wrap_with_margin(value: f32, max: f32, margin: f32) -> f32 {
    if value < -margin {
        max + margin
    } else if value > max + margin {
        -margin
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_coordinate_stays_in_range() {
        assert_eq!(wrap_coordinate(5.0, 100.0), 5.0);
        assert_eq!(wrap_coordinate(105.0, 100.0), 5.0);
        assert_eq!(wrap_coordinate(-5.0, 100.0), 95.0);
        assert_eq!(wrap_coordinate(100.0, 100.0), 0.0);
    }

    #[test]
    fn wrap_with_margin_requires_full_exit() {
        // Inside the margin band: untouched
        assert_eq!(wrap_with_margin(-10.0, 100.0, 50.0), -10.0);
        // Fully past the margin: re-enters on the far side
        assert_eq!(wrap_with_margin(-51.0, 100.0, 50.0), 150.0);
        assert_eq!(wrap_with_margin(151.0, 100.0, 50.0), -50.0);
    }

    #[test]
    fn ms_to_ticks_matches_game_durations() {
        use consts::ms_to_ticks;
        assert_eq!(ms_to_ticks(1000), 60);
        assert_eq!(ms_to_ticks(250), 15);
        assert_eq!(ms_to_ticks(100), 6);
        assert_eq!(ms_to_ticks(5000), 300);
    }
}
