//! Player preferences
//!
//! Persisted in LocalStorage on the web build; the native build uses
//! defaults. Holds preferences only, never scores.

use serde::{Deserialize, Serialize};

/// LocalStorage key
pub const STORAGE_KEY: &str = "no_screens_settings";

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all feedback blips
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no breathing wobble)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Whether entities get the breathing wobble
    pub fn animate_entities(&self) -> bool {
        !self.reduced_motion
    }

    /// Flip mute, returning the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Parse stored JSON, falling back to defaults on anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"muted": true}"#);
        assert!(s.muted);
        assert_eq!(s.master_volume, 0.8);
        assert!(s.animate_entities());
    }

    #[test]
    fn test_garbage_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_reduced_motion_stops_wobble() {
        let s = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!s.animate_entities());
    }

    #[test]
    fn test_toggle_muted_survives_storage() {
        let mut s = Settings::default();
        assert!(s.toggle_muted());
        let json = serde_json::to_string(&s).expect("serialize");
        let stored = Settings::from_json(&json);
        assert!(stored.muted);
        assert_eq!(stored.master_volume, s.master_volume);

        let mut back = stored;
        assert!(!back.toggle_muted());
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings {
            sfx_volume: 0.5,
            ..Default::default()
        };
        let json = serde_json::to_string(&s).expect("serialize");
        assert_eq!(Settings::from_json(&json), s);
    }
}
