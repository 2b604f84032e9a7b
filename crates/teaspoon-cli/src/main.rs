//! teaspoon CLI - post notes and photos from the terminal
//!
//! Plays the part of the web form: gathers a note and an optional image,
//! hands them to the submit handler, and prints whatever it decides.

mod cli;
mod commands;
mod config_file;
mod error;
mod ui;


use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::common::load_settings;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::feed::run_feed;
use crate::commands::post::run_post;
use crate::commands::who::run_who;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("teaspoon=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Post { note, image }) => {
            let settings = load_settings(cli.server_url, config_path)?;
            run_post(&note, image.as_deref(), &settings).await?;
        }
        Some(Commands::Feed { limit, json }) => {
            let settings = load_settings(cli.server_url, config_path)?;
            run_feed(limit, json, &settings).await?;
        }
        Some(Commands::Who { json }) => {
            let settings = load_settings(cli.server_url, config_path)?;
            run_who(json, &settings).await?;
        }
        Some(Commands::Config { command }) => run_config(command, cli.server_url, config_path)?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            // Quick post mode: teaspoon "my note"
            if cli.note.is_empty() {
                Cli::command().print_help()?;
                println!();
            } else {
                let settings = load_settings(cli.server_url, config_path)?;
                run_post(&cli.note, None, &settings).await?;
            }
        }
    }

    Ok(())
}
