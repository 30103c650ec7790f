//! Player preferences
//!
//! Persisted as JSON, separately from high scores. A missing or corrupt file
//! falls back to defaults rather than failing the game.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Show the FPS counter in the HUD
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Effective cue volume after the mute switch
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Clamp volumes into range; applied after every load
    fn sanitize(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Load from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => settings.sanitize(),
                Err(err) => {
                    log::warn!("settings file unreadable ({err}), using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist to a JSON file
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mute_zeroes_the_effective_volume() {
        let mut settings = Settings::default();
        assert!(settings.effective_volume() > 0.0);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut settings = Settings::default();
        settings.master_volume = 0.5;
        settings.show_fps = true;

        let path = std::env::temp_dir().join("vector_rocks_settings_test.json");
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn out_of_range_volumes_are_clamped_on_load() {
        let path = std::env::temp_dir().join("vector_rocks_settings_clamp_test.json");
        fs::write(
            &path,
            r#"{"master_volume": 9.0, "sfx_volume": -1.0, "muted": false, "show_fps": false}"#,
        )
        .unwrap();
        let loaded = Settings::load_from(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.master_volume, 1.0);
        assert_eq!(loaded.sfx_volume, 0.0);
    }
}
