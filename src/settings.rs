//! Game settings and preferences
//!
//! Read from LocalStorage on the web and from a JSON file named by the
//! `PIXEL_COW_SETTINGS` environment variable on native. Anything missing or
//! malformed falls back to the defaults.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// Hand particles to the renderer
    pub particles: bool,

    // === Behavior ===
    /// Pause automatically when the tab is hidden or the window loses focus
    pub pause_on_blur: bool,
    /// Fixed RNG seed for reproducible runs; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            particles: true,
            pause_on_blur: true,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pixel_cow_settings";
    /// Environment variable naming a settings file (native only)
    pub const ENV_VAR: &'static str = "PIXEL_COW_SETTINGS";

    /// Parse settings JSON; absent fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp volumes into range (NaN becomes silent)
    pub fn sanitized(mut self) -> Self {
        self.master_volume = clamp_volume(self.master_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self
    }

    /// Effective sound effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn from_json_or_default(json: &str, source: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from {source}");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings in {source}: {e}");
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
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::from_json_or_default(&json, "LocalStorage");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `PIXEL_COW_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };
        let source = path.to_string_lossy().into_owned();
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json_or_default(&json, &source),
            Err(e) => {
                log::warn!("Cannot read settings file {source}: {e}");
                Self::default()
            }
        }
    }
}

fn clamp_volume(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true, "seed": 42 }"#).expect("valid json");
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.master_volume, 0.8);
        assert!(settings.particles);
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_volumes_are_clamped() {
        let settings =
            Settings::from_json(r#"{ "master_volume": 3.0, "sfx_volume": -1.0 }"#).expect("valid json");
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{ "muted": "loud" }"#).is_err());
        assert_eq!(Settings::from_json_or_default("[]", "test"), Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            sfx_volume: 0.5,
            particles: false,
            ..Default::default()
        };
        let json = settings.to_json().expect("serializes");
        assert_eq!(Settings::from_json(&json).expect("parses"), settings);
    }
}
