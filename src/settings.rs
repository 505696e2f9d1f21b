//! Presentation preferences
//!
//! Persisted in LocalStorage on the web. None of these affect the
//! simulation.

use serde::{Deserialize, Serialize};

/// When to show the on-screen ▲/▼ buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TouchControls {
    /// Only on touch-capable devices
    #[default]
    Auto,
    Always,
    Never,
}

impl TouchControls {
    pub fn as_str(&self) -> &'static str {
        match self {
            TouchControls::Auto => "Auto",
            TouchControls::Always => "Always",
            TouchControls::Never => "Never",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(TouchControls::Auto),
            "always" | "on" => Some(TouchControls::Always),
            "never" | "off" => Some(TouchControls::Never),
            _ => None,
        }
    }

    /// Resolve against what the device supports
    pub fn visible(&self, touch_device: bool) -> bool {
        match self {
            TouchControls::Auto => touch_device,
            TouchControls::Always => true,
            TouchControls::Never => false,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub touch_controls: TouchControls,
    /// Show the "Use ↑↓ or W/S to move" hint
    #[serde(default = "default_true")]
    pub show_controls_hint: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            touch_controls: TouchControls::Auto,
            show_controls_hint: true,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "boss_rush_settings";

    /// Parse stored settings, falling back to defaults on garbage
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
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
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
            match serde_json::to_string(self) {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Could not write settings to LocalStorage");
                    }
                }
                Err(e) => log::error!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
