use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SongidError};

pub const DEFAULT_SONGREC: &str = "songrec";
pub const DEFAULT_RECOGNITION_MODE: &str = "audio-file-to-recognized-song";
pub const DEFAULT_AUDIO_EXTENSION: &str = "mp3";
pub const DEFAULT_COMPANION_EXTENSION: &str = "CDG";
pub const DEFAULT_COMPANION_RENAME_EXTENSION: &str = "cdg";

/// Defaults that can be stored in a file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub songrec: Option<String>,
    pub recognition_mode: Option<String>,
    pub audio_extension: Option<String>,
    pub companion_extension: Option<String>,
    pub companion_rename_extension: Option<String>,
    pub rename_companion: Option<bool>,
}

/// Fully resolved settings used at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub songrec: String,
    pub recognition_mode: String,
    pub audio_extension: String,
    /// Extension searched for next to the audio file (case-sensitive)
    pub companion_extension: String,
    /// Extension given to the companion after renaming
    pub companion_rename_extension: String,
    pub rename_companion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().resolve()
    }
}

impl Config {
    /// Get the config file path (~/.state/songid/defaults.toml)
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| SongidError::Config("HOME environment variable not set".to_string()))?;

        let config_dir = Path::new(&home).join(".state").join("songid");
        Ok(config_dir.join("defaults.toml"))
    }

    /// Load config from `path`, or from the default location when `None`.
    /// A missing file yields an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::get_config_path() {
                Ok(p) => p,
                Err(e) => {
                    log::debug!("{}, using built-in defaults", e);
                    return Ok(Config::default());
                }
            },
        };

        if !config_path.exists() {
            log::debug!("No config at {}, using built-in defaults", config_path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            SongidError::Config(format!("cannot read {}: {}", config_path.display(), e))
        })?;
        let config = Self::from_toml(&content)
            .map_err(|e| SongidError::Config(format!("{}: {}", config_path.display(), e)))?;
        log::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Fill unset keys with the built-in defaults.
    pub fn resolve(&self) -> Settings {
        fn or(value: &Option<String>, default: &str) -> String {
            value.clone().unwrap_or_else(|| default.to_string())
        }

        Settings {
            songrec: or(&self.songrec, DEFAULT_SONGREC),
            recognition_mode: or(&self.recognition_mode, DEFAULT_RECOGNITION_MODE),
            audio_extension: or(&self.audio_extension, DEFAULT_AUDIO_EXTENSION),
            companion_extension: or(&self.companion_extension, DEFAULT_COMPANION_EXTENSION),
            companion_rename_extension: or(
                &self.companion_rename_extension,
                DEFAULT_COMPANION_RENAME_EXTENSION,
            ),
            rename_companion: self.rename_companion.unwrap_or(true),
        }
    }
}

impl Settings {
    /// Log the settings in a human-readable format
    pub fn log(&self) {
        log::debug!("Recognizer:          {} {}", self.songrec, self.recognition_mode);
        log::debug!("Audio extension:     .{}", self.audio_extension);
        log::debug!(
            "Companion:           .{} -> .{} ({})",
            self.companion_extension,
            self.companion_rename_extension,
            if self.rename_companion { "enabled" } else { "disabled" }
        );
    }
}
