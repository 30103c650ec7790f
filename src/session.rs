//! Game state machine and session orchestration
//!
//! `Session` owns the simulation state while a game is in progress, feeds it
//! mapped input once per tick, and folds the tick's events into score, lives,
//! audio cues, and phase transitions. The simulation loop and input listeners
//! are live only while in `Playing`; entering and leaving that phase
//! attaches/detaches them idempotently.

use glam::Vec2;
use log::info;

use crate::audio::{AudioCue, AudioSink, NullAudio};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::input::InputMapper;
use crate::render::FrameSnapshot;
use crate::sim::{self, Arena, GameEvent, SimState};

/// Lifecycle phases of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Initial screen; no simulation exists
    Start,
    /// Active gameplay; the loop ticks and input is attached
    Playing,
    /// Lives reached zero; awaiting restart or score submission
    GameOver,
    /// Submitted score is on display
    Leaderboard,
}

/// One player session: state machine, counters, and collaborators
pub struct Session {
    phase: GamePhase,
    score: u32,
    lives: u32,
    /// Exists only while in `Playing`
    sim: Option<SimState>,
    mapper: InputMapper,
    input_attached: bool,
    /// Total listener attachments; exactly one per entry into `Playing`
    input_registrations: u32,
    audio: Box<dyn AudioSink>,
    scores: HighScores,
    arena: Arena,
    /// Positions of asteroids destroyed during the most recent step; the
    /// render layer anchors explosion effects here for one frame
    explosions: Vec<Vec2>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_audio(Box::new(NullAudio))
    }

    pub fn with_audio(audio: Box<dyn AudioSink>) -> Self {
        Self {
            phase: GamePhase::Start,
            score: 0,
            lives: 0,
            sim: None,
            mapper: InputMapper::new(),
            input_attached: false,
            input_registrations: 0,
            audio,
            scores: HighScores::new(),
            arena: Arena::default(),
            explosions: Vec::new(),
        }
    }

    /// Replace the in-memory leaderboard, typically with one the host loaded
    /// from disk at startup
    pub fn with_scores(mut self, scores: HighScores) -> Self {
        self.scores = scores;
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Live simulation state, present only while playing
    pub fn sim(&self) -> Option<&SimState> {
        self.sim.as_ref()
    }

    pub fn sim_mut(&mut self) -> Option<&mut SimState> {
        self.sim.as_mut()
    }

    /// Listener attachment count; diagnostic for duplicate-registration bugs
    pub fn input_registrations(&self) -> u32 {
        self.input_registrations
    }

    /// Begin a new game: reset counters, create the sim, attach input
    ///
    /// Re-entry while already `Playing` is a no-op so that a stray second
    /// start command can never double-register listeners or reset a live run.
    pub fn start_game(&mut self, seed: u64) {
        if self.phase == GamePhase::Playing {
            return;
        }
        self.score = 0;
        self.lives = START_LIVES;
        self.explosions.clear();
        self.sim = Some(SimState::new(seed, self.arena));
        self.attach_input();
        self.phase = GamePhase::Playing;
        info!("session started (seed {seed})");
    }

    fn attach_input(&mut self) {
        if !self.input_attached {
            self.input_attached = true;
            self.input_registrations += 1;
        }
    }

    fn detach_input(&mut self) {
        if self.input_attached {
            self.input_attached = false;
            self.mapper.release_all();
        }
    }

    /// Raw key-down; forwarded to the mapper only while listeners are attached
    pub fn key_down(&mut self, code: &str) {
        if self.input_attached {
            self.mapper.key_down(code);
        }
    }

    /// Raw key-up; forwarded to the mapper only while listeners are attached
    pub fn key_up(&mut self, code: &str) {
        if self.input_attached {
            self.mapper.key_up(code);
        }
    }

    /// Viewport resize: clamp the arena and recenter the ship
    pub fn resize(&mut self, viewport_w: f32, viewport_h: f32) {
        self.arena = Arena::fit_viewport(viewport_w, viewport_h);
        if let Some(state) = self.sim.as_mut() {
            state.arena = self.arena;
            state.ship.pos = self.arena.center();
        }
    }

    /// Advance the simulation by one fixed tick; a no-op outside `Playing`
    pub fn step(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.explosions.clear();
        let Some(state) = self.sim.as_mut() else {
            return;
        };
        let input = self.mapper.tick_input();
        let events = sim::tick(state, &input, self.score);
        for event in events {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::ShotFired => self.audio.play(AudioCue::ShotFired),
            GameEvent::AsteroidDestroyed { pos, children } => {
                self.explosions.push(pos);
                self.score += SCORE_PER_ASTEROID;
                self.audio.play(AudioCue::AsteroidExplosion);
                log::debug!(
                    "asteroid destroyed at ({:.1}, {:.1}) into {children} pieces",
                    pos.x,
                    pos.y
                );
            }
            GameEvent::ShipHit => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 && self.phase == GamePhase::Playing {
                    self.end_game();
                }
            }
            GameEvent::PowerUpCollected => log::debug!("power-up collected"),
            GameEvent::PowerUpExpired => log::debug!("power-up expired"),
        }
    }

    /// Lives hit zero: stop the loop, release input, drop the sim
    fn end_game(&mut self) {
        self.detach_input();
        self.sim = None;
        self.phase = GamePhase::GameOver;
        self.audio.play(AudioCue::GameOver);
        info!("game over with score {}", self.score);
    }

    /// Record the finished run under `name` and show the leaderboard
    ///
    /// Valid only from `GameOver`; returns the 1-indexed rank, or `None` if
    /// the score did not qualify (the phase still advances — the board is
    /// shown either way).
    pub fn submit_score(&mut self, name: &str) -> Option<usize> {
        if self.phase != GamePhase::GameOver {
            return None;
        }
        let rank = self.scores.add_score(name, u64::from(self.score));
        self.phase = GamePhase::Leaderboard;
        rank
    }

    /// Frame data for the render adapter
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::build(
            self.phase,
            self.score,
            self.lives,
            self.arena,
            self.sim.as_ref(),
            &self.explosions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Asteroid;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every cue for inspection
    struct RecordingAudio(Rc<RefCell<Vec<AudioCue>>>);

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: AudioCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn session_with_recorder() -> (Session, Rc<RefCell<Vec<AudioCue>>>) {
        let cues = Rc::new(RefCell::new(Vec::new()));
        let session = Session::with_audio(Box::new(RecordingAudio(cues.clone())));
        (session, cues)
    }

    /// Park an asteroid on top of the ship so the next step is a hit
    fn place_asteroid_on_ship(session: &mut Session) {
        let state = session.sim_mut().expect("playing");
        let pos = state.ship.pos;
        state.asteroids.push(Asteroid {
            pos,
            vel: Vec2::ZERO,
            radius: 40.0,
            sides: 6,
        });
    }

    #[test]
    fn new_session_waits_on_the_start_screen() {
        let session = Session::new();
        assert_eq!(session.phase(), GamePhase::Start);
        assert!(session.sim().is_none());
    }

    #[test]
    fn start_game_resets_counters_and_creates_the_sim() {
        let mut session = Session::new();
        session.start_game(1);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), START_LIVES);
        assert!(session.sim().is_some());
    }

    #[test]
    fn reentering_playing_does_not_double_register_input() {
        let mut session = Session::new();
        session.start_game(1);
        session.start_game(2);
        assert_eq!(session.input_registrations(), 1);

        // A fresh cycle through game over re-attaches exactly once
        session.sim_mut().unwrap().asteroids.clear();
        for _ in 0..START_LIVES {
            place_asteroid_on_ship(&mut session);
            session.step();
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        session.start_game(3);
        assert_eq!(session.input_registrations(), 2);
    }

    #[test]
    fn ship_hits_consume_lives_and_end_the_game() {
        let (mut session, cues) = session_with_recorder();
        session.start_game(5);

        place_asteroid_on_ship(&mut session);
        session.step();
        assert_eq!(session.lives(), START_LIVES - 1);
        assert_eq!(session.phase(), GamePhase::Playing);

        for _ in 0..START_LIVES - 1 {
            place_asteroid_on_ship(&mut session);
            session.step();
        }
        assert_eq!(session.lives(), 0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(session.sim().is_none(), "sim dropped on leaving playing");

        let game_overs = cues
            .borrow()
            .iter()
            .filter(|c| **c == AudioCue::GameOver)
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn destroyed_asteroids_score_ten_points_each() {
        let (mut session, cues) = session_with_recorder();
        session.start_game(5);

        // A bullet resting on a small asteroid, away from the ship
        {
            let state = session.sim_mut().unwrap();
            state.asteroids.push(Asteroid {
                pos: Vec2::new(600.0, 500.0),
                vel: Vec2::ZERO,
                radius: ASTEROID_MIN_SPLIT_RADIUS,
                sides: 5,
            });
            state.bullets.push(crate::sim::Bullet {
                pos: Vec2::new(600.0, 500.0),
                vel: Vec2::ZERO,
                radius: BULLET_RADIUS,
            });
        }

        session.step();
        assert_eq!(session.score(), SCORE_PER_ASTEROID);
        assert!(cues.borrow().contains(&AudioCue::AsteroidExplosion));
    }

    #[test]
    fn destroyed_asteroids_mark_explosions_for_one_frame() {
        let mut session = Session::new();
        session.start_game(5);

        let blast = Vec2::new(600.0, 500.0);
        {
            let state = session.sim_mut().unwrap();
            state.asteroids.push(Asteroid {
                pos: blast,
                vel: Vec2::ZERO,
                radius: ASTEROID_MIN_SPLIT_RADIUS,
                sides: 5,
            });
            state.bullets.push(crate::sim::Bullet {
                pos: blast,
                vel: Vec2::ZERO,
                radius: BULLET_RADIUS,
            });
        }

        session.step();
        assert_eq!(session.snapshot().explosions, vec![blast]);

        // The marker lives exactly one step
        session.step();
        assert!(session.snapshot().explosions.is_empty());
    }

    #[test]
    fn step_is_a_no_op_outside_playing() {
        let mut session = Session::new();
        session.step();
        assert_eq!(session.phase(), GamePhase::Start);
        assert!(session.sim().is_none());
    }

    #[test]
    fn key_events_are_ignored_while_detached() {
        let mut session = Session::new();
        session.key_down("ArrowUp");
        session.start_game(1);
        session.step();
        // The pre-start key press must not have leaked into the sim
        assert_eq!(session.sim().unwrap().ship.thrust, 0.0);
    }

    #[test]
    fn submit_score_moves_to_the_leaderboard() {
        let mut session = Session::new();
        session.start_game(1);
        session.sim_mut().unwrap().asteroids.clear();
        for _ in 0..START_LIVES {
            place_asteroid_on_ship(&mut session);
            session.step();
        }
        assert_eq!(session.phase(), GamePhase::GameOver);

        session.submit_score("ada");
        assert_eq!(session.phase(), GamePhase::Leaderboard);

        // And a new cycle can begin from here
        session.start_game(7);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn preloaded_board_ranks_new_runs_against_old_bests() {
        let mut board = HighScores::new();
        board.add_score("vet", 1000);
        let mut session = Session::new().with_scores(board);

        session.start_game(9);
        {
            let state = session.sim_mut().unwrap();
            state.asteroids.push(Asteroid {
                pos: Vec2::new(600.0, 500.0),
                vel: Vec2::ZERO,
                radius: ASTEROID_MIN_SPLIT_RADIUS,
                sides: 5,
            });
            state.bullets.push(crate::sim::Bullet {
                pos: Vec2::new(600.0, 500.0),
                vel: Vec2::ZERO,
                radius: BULLET_RADIUS,
            });
        }
        session.step();
        assert_eq!(session.score(), SCORE_PER_ASTEROID);

        for _ in 0..START_LIVES {
            place_asteroid_on_ship(&mut session);
            session.step();
        }
        assert_eq!(session.phase(), GamePhase::GameOver);

        // Ranks second behind the loaded 1000-point entry
        assert_eq!(session.submit_score("new"), Some(2));
        assert_eq!(session.scores().top(10).len(), 2);
    }

    #[test]
    fn submit_score_is_rejected_outside_game_over() {
        let mut session = Session::new();
        assert_eq!(session.submit_score("ada"), None);
        assert_eq!(session.phase(), GamePhase::Start);
    }

    #[test]
    fn resize_clamps_the_arena_and_recenters_the_ship() {
        let mut session = Session::new();
        session.start_game(1);

        session.resize(500.0, 400.0);
        let arena = session.arena();
        assert_eq!(arena.width, 500.0 - ARENA_VIEWPORT_MARGIN);
        assert_eq!(arena.height, 400.0 - ARENA_VIEWPORT_MARGIN);

        let state = session.sim().unwrap();
        assert_eq!(state.ship.pos, arena.center());
        assert_eq!(state.arena, arena);
    }
}
