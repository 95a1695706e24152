use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::aligner::DEFAULT_TOLERANCE_SECONDS;

/// Application configuration module
/// This module handles loading, validating and saving the settings that
/// drive library scanning and subtitle merging.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Media library root, used when no path is given on the command line
    #[serde(default)]
    pub library_root: Option<PathBuf>,

    /// Library scanning settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Merge settings
    #[serde(default)]
    pub merge: MergeConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Optional file that every log line is appended to
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// How media files are recognised while scanning
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScanConfig {
    // @field: Video extensions, without the dot
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    // @field: Subtitle extension, without the dot
    #[serde(default = "default_subtitle_extension")]
    pub subtitle_extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            video_extensions: default_video_extensions(),
            subtitle_extension: default_subtitle_extension(),
        }
    }
}

/// Merge settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MergeConfig {
    /// Tolerance window for timestamp alignment, in seconds
    #[serde(default = "default_tolerance_seconds")]
    pub tolerance_seconds: f64,

    /// Language tag preferred as the base track (e.g. "en")
    /// Falls back to the first tag in alphabetical order
    #[serde(default)]
    pub base_language: Option<String>,

    /// Also merge movie folders, not only TV episodes
    #[serde(default)]
    pub include_movies: bool,

    /// Re-merge items that already have a combined track
    #[serde(default)]
    pub force_overwrite: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            tolerance_seconds: default_tolerance_seconds(),
            base_language: None,
            include_movies: false,
            force_overwrite: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_video_extensions() -> Vec<String> {
    vec!["mkv".to_string(), "mp4".to_string(), "avi".to_string()]
}

fn default_subtitle_extension() -> String {
    "srt".to_string()
}

fn default_tolerance_seconds() -> f64 {
    DEFAULT_TOLERANCE_SECONDS
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.merge.tolerance_seconds;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(anyhow!("Merge tolerance must be a non-negative number of seconds, got {}", tolerance));
        }

        if self.scan.video_extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(anyhow!("At least one video extension is required"));
        }

        if self.scan.subtitle_extension.trim().is_empty() {
            return Err(anyhow!("Subtitle extension must not be empty"));
        }

        Ok(())
    }

    /// Load a configuration file, writing a default one when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            library_root: None,
            scan: ScanConfig::default(),
            merge: MergeConfig::default(),
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}
