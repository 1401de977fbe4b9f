//! Quote records
//!
//! Two shapes of the same data:
//! - `Quote`: what callers send in and what list/random hand back
//! - `StoredQuote`: what the store keeps and persists, with its assigned id

mod record;

pub use record::{Quote, QuoteId, StoredQuote};
