//! Service configuration from an env file
//!
//! Keys:
//! - `JSONPATH`: quotes file (default `./storage/quotes.json`)
//! - `PORT`: listen port (default 8080)
//! - `HOST`: listen host (default `0.0.0.0`)
//! - `LOGPATH`: log file (default `log.log`)
//! - `CORS_ORIGINS`: comma-separated allowed origins (default: any)
//!
//! The file is read with dotenvy without touching the process environment.
//! A missing file means defaults; a malformed one is an error.

use std::path::{Path, PathBuf};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_STORAGE_PATH: &str = "./storage/quotes.json";
pub const DEFAULT_LOG_PATH: &str = "log.log";

/// Everything the `serve` command needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage_path: PathBuf,
    pub log_path: PathBuf,
    pub http: HttpServerConfig,
    /// The env file the values came from; `None` when defaults were used
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            http: HttpServerConfig::default(),
            source: None,
        }
    }
}

impl AppConfig {
    /// Load from an env file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> CliResult<Self> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => return Ok(Self::default()),
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let vars = iter
            .collect::<Result<Vec<(String, String)>, _>>()
            .map_err(|e| {
                CliError::config_error(format!("Failed to parse {}: {}", path.display(), e))
            })?;

        let mut config = Self::from_vars(vars)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Build from key/value pairs. Unknown keys are ignored.
    pub fn from_vars<I>(vars: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let value = value.trim();
            match key.trim() {
                "JSONPATH" if !value.is_empty() => config.storage_path = PathBuf::from(value),
                "LOGPATH" if !value.is_empty() => config.log_path = PathBuf::from(value),
                "HOST" if !value.is_empty() => config.http.host = value.to_string(),
                "PORT" => {
                    config.http.port = value.parse().map_err(|_| {
                        CliError::config_error(format!(
                            "PORT must be a port number, got {:?}",
                            value
                        ))
                    })?;
                }
                "CORS_ORIGINS" => {
                    config.http.cors_origins = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect();
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
