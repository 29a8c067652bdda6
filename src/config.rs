use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Process-wide settings. Loaded once at startup and written back explicitly
/// whenever a setting changes from the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_auto_speak")]
    pub auto_speak: bool,
    #[serde(default = "default_speech_enabled")]
    pub speech_enabled: bool,
    #[serde(default)]
    pub speech_command: Option<String>,
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_theme() -> String {
    "dark".to_string()
}
fn default_auto_speak() -> bool {
    false
}
fn default_speech_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            auto_speak: default_auto_speak(),
            speech_enabled: default_speech_enabled(),
            speech_command: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("maestra")
            .join("config.toml")
    }

    pub fn log_path(&self) -> PathBuf {
        match &self.log_file {
            Some(path) => PathBuf::from(path),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("maestra")
                .join("maestra.log"),
        }
    }

    /// Reset values that no longer make sense (e.g. a theme that was removed).
    pub fn validate(&mut self, valid_themes: &[String]) {
        if !valid_themes.iter().any(|t| *t == self.theme) {
            self.theme = default_theme();
        }
        if self
            .speech_command
            .as_deref()
            .is_some_and(|c| c.trim().is_empty())
        {
            self.speech_command = None;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = if self.theme == "light" {
            "dark".to_string()
        } else {
            "light".to_string()
        };
    }
}
