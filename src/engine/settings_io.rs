use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::model::settings::GameSettings;

pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("arena_tactics");
    path.push("settings.json");
    path
}

/// Loads settings from `path`, failing loudly if that file is bad.
pub fn load_settings_from(path: &Path) -> Result<GameSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read settings file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid settings file {}", path.display()))
}

/// Loads settings from the default location, or defaults if missing or unreadable.
pub fn load_settings() -> GameSettings {
    let path = settings_path();
    match fs::read_to_string(&path) {
        Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
            warn!("ignoring invalid settings at {}: {}", path.display(), err);
            GameSettings::default()
        }),
        Err(_) => {
            debug!("no settings at {}, using defaults", path.display());
            GameSettings::default()
        }
    }
}

pub fn save_settings(settings: &GameSettings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))
}
