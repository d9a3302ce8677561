use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Shown in titles and used as the base of the page title.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Base URL of the haste-compatible server.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Feature toggle for the share action. Off means the action is
    /// never enabled and its control stays hidden.
    #[serde(default)]
    pub share_enabled: bool,

    /// Share-intent URL prefix; the document URL is appended.
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
}

fn default_app_name() -> String {
    "quickpaste".to_string()
}

fn default_server_url() -> String {
    "https://hastebin.com".to_string()
}

fn default_share_base_url() -> String {
    "https://twitter.com/share?url=".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            server_url: default_server_url(),
            share_enabled: false,
            share_base_url: default_share_base_url(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Settings(format!("Failed to create config directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;
        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("quickpaste");
        path.push("settings.json");
        path
    }
}
