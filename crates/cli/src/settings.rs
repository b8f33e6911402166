use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use chrono::Duration;
use dirs_next as dirs;
use liftlog_domain::{DEFAULT_MIN_ARC_LENGTH, DEFAULT_SEPARATOR_DAYS};
use log::LevelFilter;

const APP_DIR: &str = "liftlog";
const SETTINGS_FILE: &str = "settings.json";
const DATA_FILE: &str = "data.json";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Days without training after which a new arc begins
    pub separator_days: i64,
    pub min_arc_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            separator_days: DEFAULT_SEPARATOR_DAYS,
            min_arc_length: DEFAULT_MIN_ARC_LENGTH,
            data_file: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Reads the settings from `path` or from the default location. A missing file results in
    /// the default settings.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_settings_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid settings in {}", path.display()))
    }

    #[must_use]
    pub fn separator(&self) -> Duration {
        Duration::days(self.separator_days)
    }

    /// The configured log level, raised by `verbose` steps.
    #[must_use]
    pub fn level_filter(&self, verbose: u8) -> LevelFilter {
        let base = LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Warn);
        LevelFilter::iter()
            .skip_while(|l| *l != base)
            .nth(usize::from(verbose))
            .unwrap_or(LevelFilter::Trace)
    }

    pub fn data_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR).join(DATA_FILE))
                .context("failed to determine data directory, please configure a data file"),
        }
    }
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}
