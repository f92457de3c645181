use std::fs;

use ratatui::style::{Color, Modifier, Style};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::engine::Category;

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
    pub hard: String,
    pub hard_important: String,
    pub important: String,
    pub fade_2: String,
    pub fade_1: String,
    pub low: String,
    pub selection_bg: String,
    pub selection_fg: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // Try user themes dir first
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("wordahead")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        // Then bundled themes
        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    #[allow(dead_code)]
    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("reader-dark").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            hard: "#c084fc".to_string(),
            hard_important: "#a855f7".to_string(),
            important: "#f5f5f4".to_string(),
            fade_2: "#9399b2".to_string(),
            fade_1: "#6c7086".to_string(),
            low: "#45475a".to_string(),
            selection_bg: "#f5e0dc".to_string(),
            selection_fg: "#1e1e2e".to_string(),
            accent: "#89b4fa".to_string(),
            accent_dim: "#45475a".to_string(),
            border: "#45475a".to_string(),
            border_focused: "#89b4fa".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn hard(&self) -> Color { Self::parse_color(&self.hard) }
    pub fn hard_important(&self) -> Color { Self::parse_color(&self.hard_important) }
    pub fn important(&self) -> Color { Self::parse_color(&self.important) }
    pub fn fade_2(&self) -> Color { Self::parse_color(&self.fade_2) }
    pub fn fade_1(&self) -> Color { Self::parse_color(&self.fade_1) }
    pub fn low(&self) -> Color { Self::parse_color(&self.low) }
    pub fn selection_bg(&self) -> Color { Self::parse_color(&self.selection_bg) }
    pub fn selection_fg(&self) -> Color { Self::parse_color(&self.selection_fg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }

    /// Emphasis style for a classified word. Hard-important and important
    /// words are bold, matching the visual weight of the category ladder.
    pub fn category_style(&self, category: Category) -> Style {
        match category {
            Category::HardImportant => Style::default()
                .fg(self.hard_important())
                .add_modifier(Modifier::BOLD),
            Category::Hard => Style::default().fg(self.hard()),
            Category::Important => Style::default()
                .fg(self.important())
                .add_modifier(Modifier::BOLD),
            Category::Fade2 => Style::default().fg(self.fade_2()),
            Category::Fade1 => Style::default().fg(self.fade_1()),
            Category::Low => Style::default().fg(self.low()),
        }
    }
}
