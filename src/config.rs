use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Engine family the dump came from. Red Alert dumps record `QUIT` for the
/// whole game only, so it is not applied to the reporting player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameFamily {
    Ra,
    Ts,
    #[default]
    Yr,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the player this dump is reported by.
    pub player_name: Option<String>,
    pub game: GameFamily,
    /// Folder receiving the per-game artifact folders, also the folder
    /// aggregation reads parsed games from.
    pub output_folder: Option<PathBuf>,
    pub session_stats_folder: Option<PathBuf>,
    pub overall_stats_folder: Option<PathBuf>,
    /// Groups of names one player goes by; the first name of a group is
    /// the one reported.
    pub player_aliases: Vec<Vec<String>>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
