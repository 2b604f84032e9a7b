use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "teaspoon")]
#[command(about = "Post notes and photos to a teaspoon feed")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server base URL (overrides TEASPOON_SERVER_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub server_url: Option<String>,

    /// Optional path to the CLI config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Quick post: teaspoon "my note here"
    #[arg(trailing_var_arg = true)]
    pub note: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Post a note, optionally with an image
    #[command(alias = "new")]
    Post {
        /// Note text (read from stdin when omitted and piped)
        note: Vec<String>,
        /// Image file to attach
        #[arg(short, long, value_name = "PATH")]
        image: Option<PathBuf>,
    },
    /// Show recent posts
    Feed {
        /// Number of posts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show who the server sees you as
    Who {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the CLI config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update the config file (stores the global --server-url too)
    Init {
        /// Upload endpoint path
        #[arg(long, value_name = "PATH")]
        upload_path: Option<String>,
        /// Page to open after a successful post
        #[arg(long, value_name = "PATH")]
        success_redirect: Option<String>,
        /// Feed endpoint path
        #[arg(long, value_name = "PATH")]
        feed_path: Option<String>,
    },
    /// Print the effective configuration
    Show,
}
