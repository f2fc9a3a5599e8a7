//! Plotter configuration.
//!
//! Loaded from `~/.plotter/config.toml` unless `--config` names another file.
//! Every key is optional; a missing default file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::Containment;
use crate::session::Settings;

/// Plotter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Written to `metadata.author` on every export.
    pub author: String,

    /// Written to `metadata.version` on every export.
    pub version: String,

    /// How close, in metres, a double click must land to select a node.
    pub match_radius_m: f64,

    /// How close, in metres, a click must land to the first vertex to close a zone.
    pub close_radius_m: f64,

    /// `bounds` (default) or `polygon`.
    pub containment: Containment,

    /// Where exports are saved when `--out-dir` is not given.
    pub out_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            author: settings.author,
            version: settings.version,
            match_radius_m: settings.match_radius_m,
            close_radius_m: settings.close_radius_m,
            containment: settings.containment,
            out_dir: None,
        }
    }
}

impl Config {
    /// Load config from `explicit`, or from the default path.
    ///
    /// An explicit path must exist. The default path may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match Self::path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    /// The default config file path: `~/.plotter/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".plotter").join("config.toml"))
    }

    fn read(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        for (key, value) in [
            ("match-radius-m", config.match_radius_m),
            ("close-radius-m", config.close_radius_m),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!(
                    "{key} must be a positive number of metres in {}",
                    path.display()
                ));
            }
        }

        Ok(config)
    }

    /// Session tunables drawn from this config.
    pub fn settings(&self) -> Settings {
        Settings {
            match_radius_m: self.match_radius_m,
            close_radius_m: self.close_radius_m,
            containment: self.containment,
            version: self.version.clone(),
            author: self.author.clone(),
        }
    }
}
