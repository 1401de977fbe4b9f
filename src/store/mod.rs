//! Quote store
//!
//! The storage engine: an ordered in-memory collection of quotes behind one
//! lock, loaded from and saved to a single JSON file.
//!
//! # Invariants
//!
//! - Ids among live quotes are distinct
//! - The id counter only grows; deleted ids are never reissued
//! - Deletion removes the entry (no tombstones)
//! - The file is read once at open and rewritten whole on save

mod errors;
mod quote_store;

pub use errors::{StoreError, StoreResult};
pub use quote_store::QuoteStore;
