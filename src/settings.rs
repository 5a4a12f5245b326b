//! Application settings management

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "kotoba.toml";

/// Application settings stored in kotoba.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Path of the SQLite database file
    pub database_path: PathBuf,
    /// Directory of static assets served at the router fallback
    pub public_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 8080,
            database_path: PathBuf::from("kotoba.db"),
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Settings {
    /// Load settings from the settings file, or return defaults if
    /// not found. `KOTOBA_PORT` and `KOTOBA_DATABASE` override the
    /// file values.
    pub fn load() -> Self {
        let mut settings: Settings = fs::read_to_string(SETTINGS_FILE)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default();
        settings.apply_env();
        settings
    }

    fn apply_env(&mut self) {
        if let Some(port) = env::var("KOTOBA_PORT").ok().and_then(|v| v.parse().ok()) {
            self.port = port;
        }
        if let Ok(path) = env::var("KOTOBA_DATABASE") {
            self.database_path = PathBuf::from(path);
        }
    }
}
