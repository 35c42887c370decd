//! Engine settings persistence
//!
//! Handles saving and loading the tunables of the visualizer: pacing, array
//! size limits, shuffle behaviour and the preselected algorithm.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::error::Result;
use crate::shuffle::ShuffleMode;
use crate::timing::{self, Timing};

/// Array size used when nothing else was requested
pub const DEFAULT_SIZE: usize = 10;

/// Smallest array the size input accepts
pub const MIN_SIZE: usize = 1;

/// Default upper bound of the size input
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Algorithm selected at startup
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Animation pacing
    #[serde(default)]
    pub animation: AnimationSettings,
    /// Array construction
    #[serde(default)]
    pub array: ArraySettings,
}

/// Animation pacing in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSettings {
    /// Pause around each swap or write
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Pause once a sort has finished, before states reset
    #[serde(default = "default_end_delay_ms")]
    pub end_delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    timing::DELAY.as_millis() as u64
}

fn default_end_delay_ms() -> u64 {
    timing::END_DELAY.as_millis() as u64
}

/// How new arrays are built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArraySettings {
    /// Size of the first array
    #[serde(default = "default_size")]
    pub default_size: usize,
    /// Requested sizes are clamped to this
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Fisher-Yates partner range
    #[serde(default)]
    pub shuffle_mode: ShuffleMode,
    /// Fixed seed for reproducible arrays, random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

fn default_max_size() -> usize {
    DEFAULT_MAX_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            animation: AnimationSettings::default(),
            array: ArraySettings::default(),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            end_delay_ms: default_end_delay_ms(),
        }
    }
}

impl Default for ArraySettings {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            shuffle_mode: ShuffleMode::default(),
            seed: None,
        }
    }
}

impl AnimationSettings {
    /// Validated timing for animated runs
    pub fn timing(&self) -> Result<Timing> {
        Timing::from_millis(self.delay_ms, self.end_delay_ms)
    }
}

impl ArraySettings {
    /// Clamp a requested size into `[MIN_SIZE, max_size]`
    pub fn clamp_size(&self, size: usize) -> usize {
        size.clamp(MIN_SIZE, self.max_size.max(MIN_SIZE))
    }
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sortle", "Sortle")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load the user's settings, falling back to defaults
    ///
    /// A missing file is normal on first start. An unreadable or malformed
    /// one is logged and ignored so the engine always comes up.
    pub fn load() -> Self {
        let Some(path) = Self::file_path().filter(|p| p.exists()) else {
            return Self::default();
        };
        Self::load_from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default settings");
            Self::default()
        })
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> std::result::Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|e| SettingsError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|e| SettingsError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save settings to the per-user config directory
    pub fn save(&self) -> std::result::Result<(), SettingsError> {
        let path = Self::file_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to_file(&path)
    }

    /// Save settings to a specific file, creating its directory
    pub fn save_to_file(&self, path: &Path) -> std::result::Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| SettingsError::io(dir, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| SettingsError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| SettingsError::io(path, e))?;
        tracing::debug!(?path, "Settings written");
        Ok(())
    }
}

/// Settings file failures, kept apart from `SortError` because they never
/// reach the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The platform offers no per-user config directory
    NoConfigDir,
    /// The file or its directory could not be read or written
    Io { path: PathBuf, message: String },
    /// The file is not a settings document
    Malformed { path: PathBuf, message: String },
}

impl SettingsError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        SettingsError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::NoConfigDir => write!(f, "No config directory for settings"),
            SettingsError::Io { path, message } => {
                write!(f, "Cannot access {}: {}", path.display(), message)
            }
            SettingsError::Malformed { path, message } => {
                write!(f, "Invalid settings in {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
