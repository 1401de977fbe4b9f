//! Observability for the quote service
//!
//! Structured JSON-lines logging through an explicit `Logger` handle.
//!
//! # Usage
//!
//! ```ignore
//! use quotes::observability::Logger;
//!
//! let logger = Logger::to_file("log.log")?;
//! logger.info("STORE_OPENED", &[("quotes", "3")]);
//! ```

mod logger;

pub use logger::{LogBuffer, Logger, Severity};
