use crate::core::cache::PROBE_COMMAND;
use crate::core::dirs::get_config_directory;
use crate::core::error::{Result, ZypperDockerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the docker binary from the config file.
pub const DOCKER_BIN_ENV: &str = "ZYPPER_DOCKER_BIN";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub docker_binary: String,
    /// Binary looked up inside images to classify them as SUSE based
    pub probe_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            docker_binary: "docker".to_string(),
            probe_command: PROBE_COMMAND.to_string(),
        }
    }
}

impl Settings {
    /// Reads `config.json` from the config directory, falling back to the
    /// defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let config_file = get_config_directory()?.join("config.json");
        let mut settings = Self::load_from(&config_file)?;

        if let Ok(binary) = std::env::var(DOCKER_BIN_ENV) {
            if !binary.is_empty() {
                log::debug!("Using docker binary from {DOCKER_BIN_ENV}: {binary}");
                settings.docker_binary = binary;
            }
        }
        Ok(settings)
    }

    pub fn load_from(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            log::debug!("No config file at {}, using defaults", config_file.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_file)?;
        serde_json::from_str(&content)
            .map_err(|e| ZypperDockerError::config_parse_failed(config_file, e))
    }
}
