//! Player preferences
//!
//! Persisted as JSON next to the high score.

use serde::{Deserialize, Serialize};

use crate::audio::BASE_VOLUME;
use crate::persistence::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output volume (0.0 - 1.0)
    pub volume: f32,
    /// All cues silenced and the background loop paused
    pub muted: bool,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: BASE_VOLUME,
            muted: false,
            show_fps: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pixel_blaster_settings";

    /// Volume change per key press
    pub const VOLUME_STEP: f32 = 0.1;

    /// Load settings; missing or malformed records fall back to defaults
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode settings: {}", e);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }

    /// Step the volume up or down, returning the new level
    pub fn adjust_volume(&mut self, steps: i32) -> f32 {
        let level = self.volume + steps as f32 * Self::VOLUME_STEP;
        // Snap to the step grid so repeated presses don't drift
        self.volume = ((level / Self::VOLUME_STEP).round() * Self::VOLUME_STEP).clamp(0.0, 1.0);
        self.volume
    }

    /// Flip the mute flag, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn sanitized(mut self) -> Self {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            BASE_VOLUME
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_missing() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_defaults_when_malformed() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_mute_survives_save_and_load() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        assert!(settings.toggle_mute());
        settings.save(&mut store);
        let loaded = Settings::load(&store);
        assert!(loaded.muted);
        assert_eq!(loaded.volume, BASE_VOLUME);
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"muted":true,"volume":7.0}"#)
            .unwrap();
        let loaded = Settings::load(&store);
        assert!(loaded.muted);
        assert!(loaded.show_fps);
        assert_eq!(loaded.volume, 1.0);
    }

    #[test]
    fn test_volume_steps_and_clamps() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        assert!((settings.adjust_volume(1) - 0.6).abs() < 1e-6);
        assert!((settings.adjust_volume(-3) - 0.3).abs() < 1e-6);
        assert_eq!(settings.adjust_volume(-10), 0.0);
        assert_eq!(settings.adjust_volume(20), 1.0);
        settings.adjust_volume(-2);
        settings.save(&mut store);
        assert!((Settings::load(&store).volume - 0.8).abs() < 1e-6);
    }
}
