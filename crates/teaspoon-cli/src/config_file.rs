//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use teaspoon_core::util::{is_http_url, normalize_text_option};
use teaspoon_core::SubmitConfig;

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "cli-config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_path: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("teaspoon").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI config directory".to_string()))
}

impl CliConfig {
    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self {
                version: default_config_version(),
                ..Self::default()
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!(
                "Failed to read config at {}: {}",
                path.display(),
                error
            ))
        })?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!(
                "Failed to parse config at {}: {}",
                path.display(),
                error
            ))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                CliError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                ))
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        normalized.validate()?;
        let serialized = serde_json::to_string_pretty(&normalized)?;
        std::fs::write(path, serialized).map_err(|error| {
            CliError::Config(format!(
                "Failed to write config at {}: {}",
                path.display(),
                error
            ))
        })
    }

    /// Route configuration with this file's overrides applied to the defaults.
    pub fn submit_config(&self) -> Result<SubmitConfig, CliError> {
        let defaults = SubmitConfig::default();
        let config = SubmitConfig {
            upload_path: normalize_text_option(self.upload_path.clone())
                .unwrap_or(defaults.upload_path),
            success_redirect: normalize_text_option(self.success_redirect.clone())
                .unwrap_or(defaults.success_redirect),
            feed_path: normalize_text_option(self.feed_path.clone()).unwrap_or(defaults.feed_path),
            who_path: defaults.who_path,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CliError> {
        if let Some(url) = &self.server_url {
            if !is_http_url(url) {
                return Err(CliError::Config(
                    "server_url must include http:// or https://".to_string(),
                ));
            }
        }
        self.submit_config().map(|_| ())
    }

    fn normalize(&mut self) {
        self.server_url = normalize_text_option(self.server_url.clone())
            .map(|url| url.trim_end_matches('/').to_string());
        self.upload_path = normalize_text_option(self.upload_path.clone());
        self.success_redirect = normalize_text_option(self.success_redirect.clone());
        self.feed_path = normalize_text_option(self.feed_path.clone());
    }
}
