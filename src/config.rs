// App configuration
// Resolved once at startup. Order: defaults, <data_dir>/config.json, environment, CLI flags.

use std::env;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    APP_DATA_DIR, CONFIG_FILENAME, DEFAULT_ADMIN_PIN, ENV_ADMIN_PIN, ENV_DATA_DIR,
};
use crate::db;
use crate::error::{KidTubeError, Result};

/// On-disk settings (`config.json` in the data directory)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub admin_pin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Shared by the admin gate and the parental lock
    pub admin_pin: String,
}

impl AppConfig {
    /// Load from the process environment
    pub fn load(data_dir_override: Option<PathBuf>) -> Result<Self> {
        Self::resolve(data_dir_override, |key| env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve<F>(data_dir_override: Option<PathBuf>, env_lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match data_dir_override {
            Some(dir) => dir,
            None => match env_lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => default_data_dir()?,
            },
        };

        let file = read_config_file(&data_dir)?;

        let admin_pin = env_lookup(ENV_ADMIN_PIN)
            .or(file.admin_pin)
            .unwrap_or_else(|| DEFAULT_ADMIN_PIN.to_string());
        validate_pin(&admin_pin)?;

        Ok(Self { data_dir, admin_pin })
    }

    pub fn db_path(&self) -> PathBuf {
        db::get_db_path(&self.data_dir)
    }

    pub fn videos_dir(&self) -> PathBuf {
        db::get_videos_dir(&self.data_dir)
    }
}

/// Default data directory: ~/.kidtube
pub fn default_data_dir() -> Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| KidTubeError::Config("could not determine home directory".to_string()))?;
    Ok(home.home_dir().join(APP_DATA_DIR))
}

/// Missing file means defaults
pub fn read_config_file(data_dir: &Path) -> Result<ConfigFile> {
    let path = data_dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let raw = std::fs::read_to_string(&path)?;
    let file = serde_json::from_str(&raw).map_err(|e| {
        log::error!("Invalid {}: {}", path.display(), e);
        KidTubeError::from(e)
    })?;
    Ok(file)
}

fn validate_pin(pin: &str) -> Result<()> {
    let digits = Regex::new(r"^[0-9]+$").map_err(|e| KidTubeError::Config(e.to_string()))?;
    if !digits.is_match(pin) {
        return Err(KidTubeError::Config(
            "admin PIN must be one or more digits".to_string(),
        ));
    }
    Ok(())
}
