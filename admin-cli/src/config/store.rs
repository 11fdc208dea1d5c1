use std::fs;
use std::path::{Path, PathBuf};

use super::schema::AdminConfig;

/// Admin console files under the user's config directory
pub struct ConfigStore {
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config_dir = dirs::config_dir()
            .ok_or("could not find config directory")?
            .join("habitpro");

        Self::at(config_dir)
    }

    /// Store rooted at an explicit directory
    pub fn at(config_dir: PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        fs::create_dir_all(&config_dir)?;

        Ok(Self {
            config_path: config_dir.join("config.json"),
            config_dir,
        })
    }

    /// Load configuration, falling back to defaults when none was saved.
    pub fn load_config(&self) -> Result<AdminConfig, Box<dyn std::error::Error>> {
        if !self.config_path.exists() {
            return Ok(AdminConfig::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        let config: AdminConfig = serde_json::from_str(&data)?;
        Ok(config)
    }

    pub fn save_config(&self, config: &AdminConfig) -> Result<(), Box<dyn std::error::Error>> {
        let data = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, data)?;
        Ok(())
    }

    /// Load configuration, writing the defaults out on first run so they
    /// can be edited.
    pub fn ensure_config(&self) -> Result<AdminConfig, Box<dyn std::error::Error>> {
        let config = self.load_config()?;
        if !self.config_path.exists() {
            self.save_config(&config)?;
        }
        Ok(config)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Persisted identity session
    pub fn session_path(&self) -> PathBuf {
        self.config_dir.join("session.json")
    }

    /// The TUI logs here so the terminal stays clean
    pub fn log_path(&self) -> PathBuf {
        self.config_dir.join("admin.log")
    }
}
