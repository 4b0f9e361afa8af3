//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blockfall/settings.toml (or platform equivalent)

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Longest player name the entry screen accepts
pub const MAX_NAME_LEN: usize = 16;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeyBindings,
    pub visual: VisualSettings,
    pub player: PlayerSettings,
}

/// Key names per action. Each action takes one key or a list of keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Keys,
    pub move_right: Keys,
    pub soft_drop: Keys,
    pub rotate: Keys,
    pub pause: Keys,
    pub quit: Keys,
}

/// `"Left"` or `["Left", "a"]` in the TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keys {
    One(String),
    Many(Vec<String>),
}

impl Keys {
    fn of(keys: &[&str]) -> Self {
        match keys {
            [single] => Keys::One(single.to_string()),
            _ => Keys::Many(keys.iter().map(|k| k.to_string()).collect()),
        }
    }

    /// Display form for hints, e.g. `p/Esc`
    pub fn label(&self) -> String {
        self.names().join("/")
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Keys::One(key) => vec![key.as_str()],
            Keys::Many(keys) => keys.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Pre-filled on the name entry screen
    pub last_name: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: Keys::of(&["Left", "a"]),
            move_right: Keys::of(&["Right", "d"]),
            soft_drop: Keys::of(&["Down", "s"]),
            rotate: Keys::of(&["Up", "w"]),
            pause: Keys::of(&["p", "Esc"]),
            quit: Keys::of(&["q"]),
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            block_style: "solid".to_string(),
        }
    }
}

impl VisualSettings {
    /// (filled, empty) cell glyphs for the configured style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", " ."),
            "round" => ("()", " ."),
            _ => ("██", "  "),
        }
    }
}

impl Settings {
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Parse settings from TOML text, falling back to defaults on error
    pub fn from_toml(contents: &str) -> Self {
        match toml::from_str(contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from file, or create default
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!("Loaded settings from {}", path.display());
                Self::from_toml(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), String> {
        let Some(dir) = Self::config_dir() else {
            return Err("Could not determine config directory".to_string());
        };
        let path = dir.join("settings.toml");

        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create config dir: {}", e))?;

        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(&path, contents).map_err(|e| format!("Failed to write settings: {}", e))?;

        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }
}
