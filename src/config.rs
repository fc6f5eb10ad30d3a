//! Configuration loading for qbot.
//!
//! Required values (bot token, snapshot path) come from the command line or
//! the environment. Tuning knobs live in an optional settings file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Get the qbot home directory (~/.qbot).
pub fn get_home_dir() -> Result<PathBuf> {
    let home = directories::UserDirs::new()
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

    Ok(home.home_dir().join(".qbot"))
}

/// Get the default settings file path.
pub fn get_settings_path() -> Result<PathBuf> {
    Ok(get_home_dir()?.join("settings.json"))
}

/// Load settings from `path`, or from ~/.qbot/settings.json.
///
/// A missing file is not an error: every field has a default. An explicitly
/// requested file must exist.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (get_settings_path()?, false),
    };

    if !path.exists() {
        if explicit {
            return Err(Error::Config(format!(
                "Settings file not found at {}",
                path.display()
            )));
        }
        tracing::debug!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let settings: Settings = serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid settings file {}: {}", path.display(), e)))?;

    validate_settings(&settings)?;

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.liveness.interval_secs == 0 {
        return Err(Error::Config(
            "liveness.interval_secs must be greater than zero".to_string(),
        ));
    }
    if settings.liveness.timeout_secs == 0 {
        return Err(Error::Config(
            "liveness.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if settings.event_buffer == 0 {
        return Err(Error::Config("event_buffer must be greater than zero".to_string()));
    }
    Ok(())
}

/// Telegram connection settings.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TelegramSettings {
    /// Group whose administrators seed the user cache
    #[serde(default)]
    pub home_chat_id: Option<i64>,
    /// Long poll timeout for getUpdates
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u32,
}

fn default_poll_timeout() -> u32 {
    10
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            home_chat_id: None,
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

/// Liveness probe settings.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Liveness {
    #[serde(default = "default_liveness_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_liveness_timeout")]
    pub timeout_secs: u64,
}

fn default_liveness_interval() -> u64 {
    60
}

fn default_liveness_timeout() -> u64 {
    10
}

impl Default for Liveness {
    fn default() -> Self {
        Self {
            interval_secs: default_liveness_interval(),
            timeout_secs: default_liveness_timeout(),
        }
    }
}

impl Liveness {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Main settings structure.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    #[serde(default)]
    pub telegram: TelegramSettings,
    #[serde(default)]
    pub liveness: Liveness,
    /// Capacity of the engine's event channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_event_buffer() -> usize {
    64
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            telegram: TelegramSettings::default(),
            liveness: Liveness::default(),
            event_buffer: default_event_buffer(),
        }
    }
}
