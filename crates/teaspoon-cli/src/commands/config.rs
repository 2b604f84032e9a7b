use std::path::Path;

use serde::Serialize;
use teaspoon_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::commands::common::{load_settings, resolve_config_path};
use crate::config_file::CliConfig;
use crate::error::CliError;

pub fn run_config(
    command: ConfigCommands,
    server_url: Option<String>,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            upload_path,
            success_redirect,
            feed_path,
        } => {
            let path = resolve_config_path(config_path)?;
            let existing = CliConfig::load_from_path(&path)?;
            let updated = merge_config(
                existing,
                server_url,
                upload_path,
                success_redirect,
                feed_path,
            );
            updated.save_to_path(&path)?;
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => run_config_show(server_url, config_path),
    }
}

/// Explicit values replace stored ones; omitted values keep what was stored.
pub fn merge_config(
    existing: CliConfig,
    server_url: Option<String>,
    upload_path: Option<String>,
    success_redirect: Option<String>,
    feed_path: Option<String>,
) -> CliConfig {
    CliConfig {
        version: existing.version,
        server_url: normalize_text_option(server_url).or(existing.server_url),
        upload_path: normalize_text_option(upload_path).or(existing.upload_path),
        success_redirect: normalize_text_option(success_redirect).or(existing.success_redirect),
        feed_path: normalize_text_option(feed_path).or(existing.feed_path),
    }
}

#[derive(Debug, Serialize)]
struct EffectiveConfig<'a> {
    server_url: &'a str,
    upload_path: &'a str,
    success_redirect: &'a str,
    feed_path: &'a str,
    who_path: &'a str,
}

fn run_config_show(server_url: Option<String>, config_path: Option<&Path>) -> Result<(), CliError> {
    let settings = load_settings(server_url, config_path)?;
    let effective = EffectiveConfig {
        server_url: &settings.server_url,
        upload_path: &settings.submit.upload_path,
        success_redirect: &settings.submit.success_redirect,
        feed_path: &settings.submit.feed_path,
        who_path: &settings.submit.who_path,
    };
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}
