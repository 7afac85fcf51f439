use color_eyre::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::controls::Controls;
use crate::error::SelectorError;
use crate::graphics::FontFace;
use crate::widget::selector::{Element, FancyStyle, SelectorBuilder, SelectorStyle};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default tracing filter, overridden by `MENU_SELECTOR_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub font: FontFace,
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub controls: Controls,
    /// Fancy style shared by every fancy selector
    #[serde(default)]
    pub fancy: FancyStyle,
    #[serde(default)]
    pub selectors: Vec<SelectorConfig>,
}

/// Sound cue configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub enabled: bool,
    pub volume: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.2,
        }
    }
}

/// One selector shown by the demo menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub title: String,
    #[serde(default)]
    pub id: String,
    /// Rows of `[label, payload...]`
    pub elements: Vec<Vec<String>>,
    #[serde(default)]
    pub default: usize,
    #[serde(default)]
    pub style: SelectorStyle,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let row = |values: &[&str]| values.iter().map(|value| (*value).to_string()).collect();
        Self {
            log_level: default_log_level(),
            font: FontFace::default(),
            sound: SoundConfig::default(),
            controls: Controls::default(),
            fancy: FancyStyle::default(),
            selectors: vec![
                SelectorConfig {
                    title: "Difficulty: ".to_string(),
                    id: "difficulty".to_string(),
                    elements: vec![
                        row(&["Easy", "1"]),
                        row(&["Medium", "2"]),
                        row(&["Hard", "3"]),
                    ],
                    default: 1,
                    style: SelectorStyle::Classic,
                },
                SelectorConfig {
                    title: "Theme".to_string(),
                    id: "theme".to_string(),
                    elements: vec![
                        row(&["Dark", "#282923"]),
                        row(&["Light", "#f0f0f0"]),
                        row(&["Solarized", "#002b36"]),
                    ],
                    default: 0,
                    style: SelectorStyle::Fancy,
                },
            ],
        }
    }
}

impl SelectorConfig {
    /// Converts the raw rows into elements, rejecting empty rows
    pub fn elements(&self) -> Result<Vec<Element<String>>, SelectorError> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, row)| Element::from_row(index, row.clone()))
            .collect()
    }

    /// Selector builder carrying this entry plus the shared settings
    pub fn builder(&self, config: &Config) -> Result<SelectorBuilder<String>, SelectorError> {
        Ok(SelectorBuilder::new(self.title.clone(), self.elements()?)
            .id(self.id.clone())
            .default_index(self.default)
            .style(self.style)
            .fancy(config.fancy)
            .controls(config.controls.clone()))
    }
}

impl Config {
    /// Loads configuration from disk or creates default if not found
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.fancy.validate()?;
        Ok(config)
    }

    /// Saves configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "menu-selector")
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))
    }

    /// Returns the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory receiving the daily log files
    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("logs"))
    }
}
