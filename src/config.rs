use crate::model::grid::DEFAULT_PAGE_LENGTH;
use crate::model::panel::PanelStrategy;
use crate::model::viewport::DEFAULT_CELL_WIDTH;
use crate::services::requests::DEFAULT_REQUEST_COMMAND;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server the listing was rendered by
    pub base_url: String,
    /// Request template; `{url}` and `{pk}` are substituted
    pub request_command: String,
    /// Command that opens edit pages (e.g. a browser); empty disables it
    pub opener_command: String,
    /// Viewport width units per terminal column
    pub cell_width: u16,
    /// Initial page length (10, 100 or 1000)
    pub page_length: usize,
    /// How mobile row clicks produce action panels
    pub panel_strategy: PanelStrategy,
    /// Bind panel controls to mouse input as panels are inserted
    pub enhance_controls: bool,
    /// Where CSV exports are written (defaults to the working directory)
    pub export_dir: Option<String>,
    /// Log filter used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_command: DEFAULT_REQUEST_COMMAND.to_string(),
            opener_command: default_opener().to_string(),
            cell_width: DEFAULT_CELL_WIDTH,
            page_length: DEFAULT_PAGE_LENGTH,
            panel_strategy: PanelStrategy::Dynamic,
            enhance_controls: true,
            export_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".hourtracker-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn log_dir() -> PathBuf {
        Self::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("logs")
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        Self::from_json(&contents)
    }

    /// Load the config, falling back to defaults
    pub fn load_or_default() -> Config {
        Self::load().unwrap_or_default()
    }

    pub fn from_json(contents: &str) -> Option<Config> {
        serde_json::from_str(contents).ok()
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
