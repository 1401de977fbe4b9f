//! Quote store error types
//!
//! Error codes:
//! - QUOTES_IO_ERROR: the backing file could not be created, read or written
//! - QUOTES_DECODE_ERROR: the backing file is not a JSON array of quotes
//! - QUOTES_INVALID_DATA: decoded quotes break the id rules
//! - QUOTES_ENCODE_ERROR: the collection could not be serialized
//! - QUOTES_EMPTY: list/random on an empty store
//! - QUOTES_NOT_FOUND: delete with an unknown id
//! - QUOTES_IDS_EXHAUSTED: no id left to assign
//! - QUOTES_INVALID_INPUT: rejected at the service boundary
//! - QUOTES_INTERNAL: lock poisoned

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::quote::QuoteId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Quote store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode stored quotes: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid stored quotes: {0}")]
    InvalidData(String),

    #[error("Failed to encode quotes: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("No quotes stored")]
    Empty,

    #[error("Quote with id {0} not found")]
    NotFound(QuoteId),

    #[error("Quote id space exhausted")]
    IdsExhausted,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "QUOTES_IO_ERROR",
            StoreError::Decode(_) => "QUOTES_DECODE_ERROR",
            StoreError::InvalidData(_) => "QUOTES_INVALID_DATA",
            StoreError::Encode(_) => "QUOTES_ENCODE_ERROR",
            StoreError::Empty => "QUOTES_EMPTY",
            StoreError::NotFound(_) => "QUOTES_NOT_FOUND",
            StoreError::IdsExhausted => "QUOTES_IDS_EXHAUSTED",
            StoreError::InvalidInput(_) => "QUOTES_INVALID_INPUT",
            StoreError::Internal(_) => "QUOTES_INTERNAL",
        }
    }

    /// Whether the caller can carry on (empty store, unknown id, bad input).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::Empty | StoreError::NotFound(_) | StoreError::InvalidInput(_)
        )
    }
}
