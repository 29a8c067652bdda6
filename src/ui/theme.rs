use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub input_bg: String,
    pub input_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// `<config_dir>/maestra/themes/`, where user themes live.
    pub fn user_themes_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("maestra").join("themes"))
    }

    /// User themes in `<config_dir>/maestra/themes/` shadow the bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        Self::load_from(name, Self::user_themes_dir().as_deref())
    }

    pub fn load_from(name: &str, user_dir: Option<&Path>) -> Option<Self> {
        if let Some(user_dir) = user_dir {
            let user_theme_path = user_dir.join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(e) => tracing::warn!(
                        path = %user_theme_path.display(),
                        error = %e,
                        "ignoring malformed user theme"
                    ),
                }
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    /// Bundled theme names plus every loadable user theme, sorted.
    pub fn available_themes() -> Vec<String> {
        Self::available_themes_in(Self::user_themes_dir().as_deref())
    }

    pub fn available_themes_in(user_dir: Option<&Path>) -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();

        if let Some(entries) = user_dir.and_then(|d| fs::read_dir(d).ok()) {
            for entry in entries.flatten() {
                let file_name = entry.file_name();
                let Some(name) = file_name.to_str().and_then(|f| f.strip_suffix(".toml")) else {
                    continue;
                };
                if Self::load_from(name, user_dir).is_some() {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        names.dedup();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("dark").unwrap_or_else(|| Self {
            name: "dark".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#111827".to_string(),
            fg: "#f3f4f6".to_string(),
            muted: "#9ca3af".to_string(),
            accent: "#818cf8".to_string(),
            accent_dim: "#374151".to_string(),
            border: "#374151".to_string(),
            border_focused: "#6366f1".to_string(),
            header_bg: "#1f2937".to_string(),
            header_fg: "#f9fafb".to_string(),
            input_bg: "#030712".to_string(),
            input_fg: "#f3f4f6".to_string(),
            bar_filled: "#4f46e5".to_string(),
            bar_empty: "#1f2937".to_string(),
            error: "#f87171".to_string(),
            warning: "#fbbf24".to_string(),
            success: "#4ade80".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn input_bg(&self) -> Color { Self::parse_color(&self.input_bg) }
    pub fn input_fg(&self) -> Color { Self::parse_color(&self.input_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
