use std::collections::HashMap;
use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use teaspoon_core::util::{normalize_base_url, normalize_text_option};
use teaspoon_core::{HttpUploadClient, SubmitConfig};

use crate::config_file::{default_config_path, CliConfig};
use crate::error::CliError;

pub const ENV_SERVER_URL: &str = "TEASPOON_SERVER_URL";
const HTTP_TIMEOUT_SECS: u64 = 60;

/// Server URL and routes after layering flag, environment, file, and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub server_url: String,
    pub submit: SubmitConfig,
}

pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, CliError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

pub fn load_settings(
    server_url: Option<String>,
    config_path: Option<&Path>,
) -> Result<ResolvedSettings, CliError> {
    let path = resolve_config_path(config_path)?;
    tracing::debug!(path = %path.display(), "Loading CLI config");
    let file = CliConfig::load_from_path(&path)?;
    let values: HashMap<String, String> = env::vars().collect();
    let settings = resolve_settings(server_url, &file, |name| values.get(name).cloned())?;
    tracing::debug!(
        server_url = %settings.server_url,
        upload_path = %settings.submit.upload_path,
        "Resolved settings"
    );
    Ok(settings)
}

pub fn resolve_settings(
    explicit_server_url: Option<String>,
    file: &CliConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedSettings, CliError> {
    let server_url = normalize_text_option(explicit_server_url)
        .or_else(|| normalize_text_option(lookup(ENV_SERVER_URL)))
        .or_else(|| normalize_text_option(file.server_url.clone()))
        .ok_or(CliError::ServerNotConfigured)?;
    let server_url = normalize_base_url(&server_url).map_err(CliError::Config)?;

    let submit = file.submit_config()?.with_lookup(lookup)?;
    Ok(ResolvedSettings { server_url, submit })
}

pub fn build_client(settings: &ResolvedSettings) -> Result<HttpUploadClient, CliError> {
    Ok(HttpUploadClient::with_timeout(
        settings.server_url.clone(),
        Duration::from_secs(HTTP_TIMEOUT_SECS),
    )?)
}

/// Note text from arguments, else from piped stdin. Returned verbatim apart
/// from trailing line breaks; validation is left to the submit handler.
pub fn resolve_note_text(note_parts: &[String]) -> Result<String, CliError> {
    let joined = note_parts.join(" ");
    if !joined.is_empty() {
        return Ok(joined);
    }

    Ok(read_piped_stdin()?.unwrap_or_default())
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(Some(strip_trailing_newlines(&buffer).to_string()))
}

pub fn strip_trailing_newlines(text: &str) -> &str {
    text.trim_end_matches(|c: char| c == '\n' || c == '\r')
}
