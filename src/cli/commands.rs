//! CLI command implementations
//!
//! `serve` boot sequence:
//! 1. Load config (env file, then command-line overrides)
//! 2. Open the logger
//! 3. Open the store; failure here is fatal
//! 4. Serve until Enter or Ctrl-C
//! 5. Save the store, whatever the server outcome

use std::sync::Arc;
use std::time::Duration;

use super::args::{Command, ServeArgs};
use super::config::AppConfig;
use super::errors::{CliError, CliResult};
use crate::http_server::{shutdown_signal, HttpServer};
use crate::observability::Logger;
use crate::service::QuoteService;
use crate::store::QuoteStore;

/// Main entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(&args),
    }
}

/// Load the env file and apply command-line overrides.
pub fn resolve_config(args: &ServeArgs) -> CliResult<AppConfig> {
    let mut config = AppConfig::load(&args.env_file)?;
    args.apply(&mut config);
    Ok(config)
}

fn open_logger(args: &ServeArgs, config: &AppConfig) -> CliResult<Logger> {
    if args.log_stdout {
        return Ok(Logger::stdout());
    }
    Logger::to_file(&config.log_path).map_err(|e| {
        CliError::io_error(format!(
            "Failed to open log file {}: {}",
            config.log_path.display(),
            e
        ))
    })
}

/// Open the store and build the service on top of it.
pub fn boot(config: &AppConfig, logger: Arc<Logger>) -> CliResult<QuoteService> {
    let store = QuoteStore::open(&config.storage_path, logger.clone()).map_err(|e| {
        let message = e.to_string();
        logger.error(
            "STORE_OPEN_FAILED",
            &[("code", e.code()), ("error", message.as_str())],
        );
        CliError::boot_failed(format!("Failed to open quote store: {}", message))
    })?;

    Ok(QuoteService::new(Arc::new(store), logger))
}

/// Save the store to the configured path, logging the outcome.
pub fn save(service: &QuoteService, config: &AppConfig, logger: &Logger) -> CliResult<()> {
    service.store().save(&config.storage_path).map_err(|e| {
        let message = e.to_string();
        logger.error(
            "STORE_SAVE_FAILED",
            &[("code", e.code()), ("error", message.as_str())],
        );
        CliError::save_failed(format!("Failed to save quotes: {}", message))
    })
}

/// Serve the quote API
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    let config = resolve_config(args)?;
    let logger = Arc::new(open_logger(args, &config)?);

    let addr = config.http.socket_addr();
    logger.info("SERVER_STARTING", &[("addr", addr.as_str())]);

    if config.source.is_none() {
        let env_file = args.env_file.display().to_string();
        logger.warn("ENV_FILE_NOT_FOUND", &[("path", env_file.as_str())]);
    }

    let service = boot(&config, logger.clone())?;
    let server = HttpServer::new(config.http.clone(), service.clone(), logger.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    let served = rt.block_on(server.start(shutdown_signal(logger.clone())));
    if let Err(e) = &served {
        let message = e.to_string();
        logger.error("SERVER_FAILED", &[("error", message.as_str())]);
    }

    let saved = save(&service, &config, &logger);

    // A pending stdin read would otherwise hold the runtime open.
    rt.shutdown_timeout(Duration::from_millis(100));
    logger.info("SERVER_EXIT", &[]);

    served.map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))?;
    saved
}
