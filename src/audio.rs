//! Audio cue triggers
//!
//! The core fires named cues on specific events and never waits for or
//! inspects the result. A sink that fails or is absent simply drops the cue;
//! the simulation is unaffected either way.

use crate::settings::Settings;

/// Named sound cues the session can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// A bullet left the ship
    ShotFired,
    /// A bullet destroyed an asteroid
    AsteroidExplosion,
    /// Lives reached zero
    GameOver,
}

impl AudioCue {
    /// Stable identifier handed to the playback backend
    pub fn id(&self) -> &'static str {
        match self {
            AudioCue::ShotFired => "shot_fired",
            AudioCue::AsteroidExplosion => "asteroid_explosion",
            AudioCue::GameOver => "game_over",
        }
    }
}

/// Fire-and-forget playback sink
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Discards every cue; the headless and test default
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Logs cues at debug level; stands in for a real backend natively
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio {
    muted: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sink honoring the player's persisted audio preferences: the
    /// mute switch, or volumes dialed down to nothing
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            muted: settings.effective_volume() == 0.0,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        if !self.muted {
            log::debug!("audio cue: {}", cue.id());
        }
    }
}
