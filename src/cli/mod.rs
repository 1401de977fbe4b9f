//! CLI module for the quote service
//!
//! Provides command-line interface for:
//! - serve: Load config, open the store, serve HTTP, save on shutdown

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{boot, resolve_config, run, run_command, save, serve};
pub use config::{AppConfig, DEFAULT_ENV_FILE, DEFAULT_LOG_PATH, DEFAULT_STORAGE_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
