//! Persistent user settings.
//!
//! Stored as TOML in `<config dir>/tripane/settings.toml`. A missing or
//! unreadable file yields the defaults; command-line flags take precedence
//! over anything loaded here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::theme::ThemeVariant;

/// User settings persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Show hidden files by default.
    pub show_hidden: bool,
    /// Color theme.
    pub theme: ThemeVariant,
    /// Command used to open files instead of the platform default.
    pub opener: Option<String>,
    /// Where drops onto a file copy to (defaults to the desktop).
    pub drop_fallback: Option<PathBuf>,
    /// Log filter directive, e.g. `debug` or `tripane_ops=trace`.
    pub log_level: Option<String>,
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tripane").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`, or return defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid settings file");
            Self::default()
        })
    }

    /// Save settings to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }
}
