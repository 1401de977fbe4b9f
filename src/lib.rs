//! quotes - a small quote store served over HTTP
//!
//! The core is [`store::QuoteStore`]: an in-memory, lock-guarded collection
//! persisted as one JSON file. [`service`], [`http_server`] and [`cli`] are
//! thin adapters around it.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod quote;
pub mod service;
pub mod store;
