//! CLI argument definitions using clap
//!
//! Commands:
//! - quotes serve [--env-file <path>] [--host <host>] [--port <port>]
//!   [--storage <path>] [--log-file <path>] [--log-stdout]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::config::{AppConfig, DEFAULT_ENV_FILE};

/// quotes - a small quote store served over HTTP
#[derive(Parser, Debug)]
#[command(name = "quotes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the quote API until Enter or Ctrl-C, then save
    Serve(ServeArgs),
}

/// Overrides for values read from the env file
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Env file with JSONPATH, PORT, HOST, LOGPATH, CORS_ORIGINS
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long)]
    pub port: Option<u16>,

    /// Path of the quotes JSON file
    #[arg(long)]
    pub storage: Option<PathBuf>,

    /// Path of the log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log to stdout instead of a file
    #[arg(long)]
    pub log_stdout: bool,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.http.host = host.clone();
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }
        if let Some(storage) = &self.storage {
            config.storage_path = storage.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.log_path = log_file.clone();
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
