//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::circles_overlap;
pub use spawn::asteroid_cap;
pub use state::{Arena, Asteroid, Bullet, GameEvent, PowerUp, PowerUpEffect, Ship, SimState};
pub use tick::{TickInput, tick};
