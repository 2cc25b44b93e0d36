use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub catalog: CatalogSourceConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {path}"))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }
}

/// Where the dataset file may live and how cover art paths are resolved.
#[derive(Debug, Deserialize)]
pub struct CatalogSourceConfig {
    /// Candidate dataset locations, tried in order; first readable wins.
    pub data_paths: Vec<PathBuf>,
    /// Base path prepended to relative cover art references.
    #[serde(default = "default_image_base")]
    pub image_base: String,
}

fn default_image_base() -> String {
    "/".to_string()
}

#[derive(Debug, Deserialize)]
pub struct PlayerConfig {
    /// Nominal length of a simulated timeline, in ticks (seconds).
    #[serde(default = "default_simulated_duration")]
    pub simulated_duration_secs: u32,
    /// Initial volume on the 0-100 control scale.
    #[serde(default = "default_volume")]
    pub volume: u8,
}

fn default_simulated_duration() -> u32 {
    180
}

fn default_volume() -> u8 {
    80
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            simulated_duration_secs: default_simulated_duration(),
            volume: default_volume(),
        }
    }
}
