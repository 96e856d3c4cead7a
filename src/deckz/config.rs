use crate::drag::DEFAULT_APPEND_ZONE;
use crate::error::{DeckzError, Result};
use crate::themes;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_THEME: &str = "Default";

/// Configuration for deckz, stored in .deckz/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeckzConfig {
    /// Theme given to newly created decks
    #[serde(default = "default_theme")]
    pub default_theme: String,

    /// Height of the zone below a list where a drop appends
    #[serde(default = "default_append_zone")]
    pub append_zone: f64,

    /// Wrap generated slides lacking a title node in a titled column
    #[serde(default = "default_repair_titles")]
    pub repair_titles: bool,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_append_zone() -> f64 {
    DEFAULT_APPEND_ZONE
}

fn default_repair_titles() -> bool {
    true
}

impl Default for DeckzConfig {
    fn default() -> Self {
        Self {
            default_theme: default_theme(),
            append_zone: default_append_zone(),
            repair_titles: default_repair_titles(),
        }
    }
}

impl DeckzConfig {
    pub const KEYS: [&'static str; 3] = ["default_theme", "append_zone", "repair_titles"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DeckzError::Io)?;
        let config: DeckzConfig =
            serde_json::from_str(&content).map_err(DeckzError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DeckzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DeckzError::Serialization)?;
        fs::write(config_path, content).map_err(DeckzError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_theme" => Some(self.default_theme.clone()),
            "append_zone" => Some(self.append_zone.to_string()),
            "repair_titles" => Some(self.repair_titles.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "default_theme" => {
                let theme = themes::get_theme(value)
                    .ok_or_else(|| format!("Unknown theme: {}", value))?;
                self.default_theme = theme.name.clone();
            }
            "append_zone" => {
                let zone: f64 = value
                    .parse()
                    .map_err(|_| format!("append_zone must be a number, got {}", value))?;
                if !zone.is_finite() || zone < 0.0 {
                    return Err(format!("append_zone must be zero or positive, got {}", value));
                }
                self.append_zone = zone;
            }
            "repair_titles" => {
                self.repair_titles = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(format!("repair_titles must be true or false, got {}", value)),
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}
