//! Submission routing configuration.
//!
//! Holds the server-relative paths the submit flow talks to. Values come from
//! built-in defaults, optionally overlaid by a serialized config document and
//! then by `TEASPOON_*` environment variables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::normalize_text_option;

pub const DEFAULT_UPLOAD_PATH: &str = "/upload";
pub const DEFAULT_SUCCESS_REDIRECT: &str = "/feed.html";
pub const DEFAULT_FEED_PATH: &str = "/feed";
pub const DEFAULT_WHO_PATH: &str = "/who";

pub const ENV_UPLOAD_PATH: &str = "TEASPOON_UPLOAD_PATH";
pub const ENV_SUCCESS_REDIRECT: &str = "TEASPOON_SUCCESS_REDIRECT";
pub const ENV_FEED_PATH: &str = "TEASPOON_FEED_PATH";
pub const ENV_WHO_PATH: &str = "TEASPOON_WHO_PATH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where uploads go and where to send the user afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// Endpoint receiving the multipart POST.
    #[serde(alias = "uploadPath")]
    pub upload_path: String,
    /// Page to navigate to after a 200 response.
    #[serde(alias = "successRedirect")]
    pub success_redirect: String,
    /// Endpoint listing stored posts.
    #[serde(alias = "feedPath")]
    pub feed_path: String,
    /// Page naming the caller's login and machine.
    #[serde(alias = "whoPath")]
    pub who_path: String,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            success_redirect: DEFAULT_SUCCESS_REDIRECT.to_string(),
            feed_path: DEFAULT_FEED_PATH.to_string(),
            who_path: DEFAULT_WHO_PATH.to_string(),
        }
    }
}

impl SubmitConfig {
    /// Overlay values from `lookup` (blank values are ignored), trim every
    /// path, and validate.
    pub fn with_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        for (name, path) in [
            (ENV_UPLOAD_PATH, &mut self.upload_path),
            (ENV_SUCCESS_REDIRECT, &mut self.success_redirect),
            (ENV_FEED_PATH, &mut self.feed_path),
            (ENV_WHO_PATH, &mut self.who_path),
        ] {
            match normalize_text_option(lookup(name)) {
                Some(value) => *path = value,
                None => *path = path.trim().to_string(),
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Every path must be server-relative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path("upload_path", &self.upload_path)?;
        validate_path("success_redirect", &self.success_redirect)?;
        validate_path("feed_path", &self.feed_path)?;
        validate_path("who_path", &self.who_path)
    }
}

fn validate_path(field: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must not be empty")));
    }
    if !value.starts_with('/') {
        return Err(ConfigError::Invalid(format!(
            "{field} must start with '/' (got '{value}')"
        )));
    }
    Ok(())
}
