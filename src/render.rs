//! Render adapter contract
//!
//! The simulation never draws. Once per frame the host builds a
//! `FrameSnapshot` from the session and hands it to whatever `RenderAdapter`
//! is installed. Nothing flows back into the simulation.

use glam::Vec2;

use crate::session::GamePhase;
use crate::sim::{Arena, SimState};

/// Ship pose for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipView {
    pub pos: Vec2,
    pub heading: f32,
    pub radius: f32,
}

/// An asteroid outline: circle plus its visual-only side count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub radius: f32,
    pub sides: u32,
}

/// Anything drawn as a plain circle (bullets, power-ups)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything a display layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub arena: Arena,
    /// Present only while a game is in progress
    pub ship: Option<ShipView>,
    pub asteroids: Vec<AsteroidView>,
    pub bullets: Vec<CircleView>,
    pub powerups: Vec<CircleView>,
    /// Positions of asteroids destroyed during the last tick, where a display
    /// layer anchors its explosion effects
    pub explosions: Vec<Vec2>,
}

impl FrameSnapshot {
    /// Build a frame from session counters and the live sim state, if any
    pub fn build(
        phase: GamePhase,
        score: u32,
        lives: u32,
        arena: Arena,
        sim: Option<&SimState>,
        explosions: &[Vec2],
    ) -> Self {
        let mut frame = Self {
            phase,
            score,
            lives,
            arena,
            ship: None,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            explosions: explosions.to_vec(),
        };

        if let Some(state) = sim {
            frame.ship = Some(ShipView {
                pos: state.ship.pos,
                heading: state.ship.heading,
                radius: state.ship.radius,
            });
            frame.asteroids = state
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    pos: a.pos,
                    radius: a.radius,
                    sides: a.sides,
                })
                .collect();
            frame.bullets = state
                .bullets
                .iter()
                .map(|b| CircleView {
                    pos: b.pos,
                    radius: b.radius,
                })
                .collect();
            frame.powerups = state
                .powerups
                .iter()
                .map(|p| CircleView {
                    pos: p.pos,
                    radius: p.radius,
                })
                .collect();
        }

        frame
    }
}

/// Consumes frames; the core never reads anything back from it
pub trait RenderAdapter {
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Logs a one-line frame summary; the headless stand-in for a real display
#[derive(Debug, Default)]
pub struct LogRenderer;

impl RenderAdapter for LogRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        log::info!(
            "frame: phase={:?} score={} lives={} asteroids={} bullets={} powerups={}",
            frame.phase,
            frame.score,
            frame.lives,
            frame.asteroids.len(),
            frame.bullets.len(),
            frame.powerups.len(),
        );
    }
}
