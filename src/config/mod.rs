//! Configuration management for orgmap

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the directory API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Directory API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Collapse the hierarchy by default when ingesting
    #[serde(default)]
    pub flatten: bool,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".orgmap").join("config.yaml"))
    }

    /// Resolve the config path, honoring a `--config` override
    pub fn resolve_path(path_override: Option<&str>) -> Result<PathBuf> {
        match path_override {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, honoring a `--config` override
    pub fn load_at(path_override: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path_override)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration, honoring a `--config` override
    pub fn save_at(&self, path_override: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path_override)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds a credential; keep it private on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// The API host to use, honoring an `--api-host` override
    pub fn resolved_host(&self, host_override: Option<&str>) -> Result<String> {
        host_override
            .map(str::to_string)
            .or_else(|| self.api_host.clone())
            .ok_or_else(|| ConfigError::MissingApiHost.into())
    }

    /// Validate that required configuration is present
    pub fn validate_auth(&self) -> Result<()> {
        if self.api_key.is_none() {
            return Err(ConfigError::MissingApiKey.into());
        }
        Ok(())
    }
}
