//! Read-only theme records and the preset catalogue.
//!
//! Decks store only a theme *name*; the record is looked up here. Unknown
//! names resolve to the first preset ("Default").

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    Light,
    Dark,
}

impl fmt::Display for ThemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeType::Light => write!(f, "light"),
            ThemeType::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub font_family: String,
    pub font_color: String,
    pub background_color: String,
    pub slide_background_color: String,
    pub accent_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_color: Option<String>,
    #[serde(rename = "type")]
    pub theme_type: ThemeType,
}

struct Preset {
    name: &'static str,
    font_family: &'static str,
    font_color: &'static str,
    background_color: &'static str,
    slide_background_color: &'static str,
    accent_color: &'static str,
    gradient_background: Option<&'static str>,
    sidebar_color: Option<&'static str>,
    nav_color: Option<&'static str>,
    theme_type: ThemeType,
}

impl From<&Preset> for Theme {
    fn from(p: &Preset) -> Self {
        Self {
            name: p.name.to_string(),
            font_family: p.font_family.to_string(),
            font_color: p.font_color.to_string(),
            background_color: p.background_color.to_string(),
            slide_background_color: p.slide_background_color.to_string(),
            accent_color: p.accent_color.to_string(),
            gradient_background: p.gradient_background.map(str::to_string),
            sidebar_color: p.sidebar_color.map(str::to_string),
            nav_color: p.nav_color.map(str::to_string),
            theme_type: p.theme_type,
        }
    }
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "Default",
        font_family: "Arial, sans-serif",
        font_color: "#000000",
        background_color: "#FFFFFF",
        slide_background_color: "#F0F0F0",
        accent_color: "#0070f3",
        gradient_background: None,
        sidebar_color: Some("#FFFFFF"),
        nav_color: Some("#FFFFFF"),
        theme_type: ThemeType::Light,
    },
    Preset {
        name: "Midnight",
        font_family: "'Inter', sans-serif",
        font_color: "#E5E7EB",
        background_color: "#0B1120",
        slide_background_color: "#111827",
        accent_color: "#6366F1",
        gradient_background: Some("linear-gradient(135deg, #0B1120 0%, #1E1B4B 100%)"),
        sidebar_color: Some("#0F172A"),
        nav_color: Some("#0F172A"),
        theme_type: ThemeType::Dark,
    },
    Preset {
        name: "Paper",
        font_family: "Georgia, serif",
        font_color: "#3F3A33",
        background_color: "#FBF8F1",
        slide_background_color: "#F3EDE0",
        accent_color: "#B45309",
        gradient_background: None,
        sidebar_color: Some("#F3EDE0"),
        nav_color: None,
        theme_type: ThemeType::Light,
    },
    Preset {
        name: "Forest",
        font_family: "'Source Sans Pro', sans-serif",
        font_color: "#ECFDF5",
        background_color: "#052E16",
        slide_background_color: "#14532D",
        accent_color: "#4ADE80",
        gradient_background: Some("linear-gradient(180deg, #052E16 0%, #14532D 100%)"),
        sidebar_color: Some("#052E16"),
        nav_color: Some("#052E16"),
        theme_type: ThemeType::Dark,
    },
    Preset {
        name: "Coral",
        font_family: "'Poppins', sans-serif",
        font_color: "#1F2937",
        background_color: "#FFF7ED",
        slide_background_color: "#FFEDD5",
        accent_color: "#F97316",
        gradient_background: None,
        sidebar_color: None,
        nav_color: None,
        theme_type: ThemeType::Light,
    },
];

pub static THEMES: Lazy<Vec<Theme>> = Lazy::new(|| PRESETS.iter().map(Theme::from).collect());

pub fn themes() -> &'static [Theme] {
    &THEMES
}

/// Case-insensitive exact lookup.
pub fn get_theme(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Lookup with the catalogue fallback: unknown or missing names give the
/// first preset.
pub fn find_theme(name: Option<&str>) -> &'static Theme {
    name.and_then(get_theme).unwrap_or(&THEMES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first() {
        let theme = &themes()[0];
        assert_eq!(theme.name, "Default");
        assert_eq!(theme.font_color, "#000000");
        assert_eq!(theme.slide_background_color, "#F0F0F0");
        assert_eq!(theme.accent_color, "#0070f3");
        assert_eq!(theme.theme_type, ThemeType::Light);
    }

    #[test]
    fn lookup_falls_back_to_default() {
        assert_eq!(find_theme(Some("midnight")).name, "Midnight");
        assert_eq!(find_theme(Some("no such theme")).name, "Default");
        assert_eq!(find_theme(None).name, "Default");
    }

    #[test]
    fn serializes_with_collaborator_field_names() {
        let json = serde_json::to_value(find_theme(Some("Midnight"))).unwrap();
        assert_eq!(json["type"], "dark");
        assert_eq!(json["slideBackgroundColor"], "#111827");
        assert!(json.get("navColor").is_some());

        let paper = serde_json::to_value(find_theme(Some("Paper"))).unwrap();
        assert!(paper.get("navColor").is_none());
    }
}
