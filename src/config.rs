use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::mastery::DEFAULT_MASTERY_THRESHOLD;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_mastery_threshold")]
    pub mastery_threshold: u32,
    #[serde(default = "default_chars_per_chapter")]
    pub chars_per_chapter: usize,
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_mastery_threshold() -> u32 {
    DEFAULT_MASTERY_THRESHOLD
}
fn default_chars_per_chapter() -> usize {
    100
}
fn default_advance_delay_ms() -> u64 {
    800
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pinyin-drill")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mastery_threshold: default_mastery_threshold(),
            chars_per_chapter: default_chars_per_chapter(),
            advance_delay_ms: default_advance_delay_ms(),
            theme: default_theme(),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pinyin-drill")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn exists() -> bool {
        Self::config_path().exists()
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Clamp numeric settings into usable ranges.
    pub fn validate(&mut self) {
        self.mastery_threshold = self.mastery_threshold.clamp(1, 50);
        self.chars_per_chapter = self.chars_per_chapter.clamp(10, 500);
        self.advance_delay_ms = self.advance_delay_ms.min(5000);
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }
}
