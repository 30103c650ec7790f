//! Vector Rocks entry point
//!
//! Runs a short headless demo session through the real session API: fixed
//! timestep accumulator, scripted input, logging render adapter. A display
//! layer drives the exact same loop from its refresh callback.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use vector_rocks::audio::LogAudio;
use vector_rocks::consts::{MAX_SUBSTEPS, SIM_DT};
use vector_rocks::render::{LogRenderer, RenderAdapter};
use vector_rocks::{GamePhase, HighScores, Session, Settings};

const SETTINGS_FILE: &str = "settings.json";
const HIGH_SCORES_FILE: &str = "highscores.json";

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("vector-rocks headless demo (seed {seed})");

    let settings = Settings::load_from(Path::new(SETTINGS_FILE));
    let scores = HighScores::load_from(Path::new(HIGH_SCORES_FILE));

    let mut session =
        Session::with_audio(Box::new(LogAudio::from_settings(&settings))).with_scores(scores);
    let mut renderer = LogRenderer;
    session.start_game(seed);

    // Scripted controls: thrust in a sweeping arc while holding fire
    session.key_down("ArrowUp");
    session.key_down("ArrowRight");
    session.key_down("Space");

    let demo_end = Instant::now() + Duration::from_secs(10);
    let mut last = Instant::now();
    let mut last_draw = Instant::now();
    let mut accumulator = 0.0f32;

    while Instant::now() < demo_end && session.phase() == GamePhase::Playing {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32().min(0.1);
        last = now;
        accumulator += dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            session.step();
            accumulator -= SIM_DT;
            substeps += 1;
        }

        if last_draw.elapsed() >= Duration::from_secs(1) {
            renderer.draw(&session.snapshot());
            last_draw = now;
        }

        std::thread::sleep(Duration::from_millis(4));
    }

    let final_score = session.score();
    if session.phase() == GamePhase::GameOver {
        let rank = session.submit_score("demo");
        match rank {
            Some(rank) => log::info!("demo scored {final_score} (rank {rank})"),
            None => log::info!("demo scored {final_score} (did not qualify)"),
        }
        if let Err(err) = session.scores().save_to(Path::new(HIGH_SCORES_FILE)) {
            log::warn!("could not save high scores: {err}");
        }
    }
    renderer.draw(&session.snapshot());

    println!("final score: {final_score}");
}
