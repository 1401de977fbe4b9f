//! Quote service
//!
//! Sits between request handling and the store:
//! - validates input before it reaches the store
//! - parses raw identifiers
//! - filters listings by author
//! - logs every outcome

use std::sync::Arc;

use crate::observability::Logger;
use crate::quote::{Quote, QuoteId, StoredQuote};
use crate::store::{QuoteStore, StoreError, StoreResult};

/// Quote operations as exposed to request handlers
#[derive(Debug, Clone)]
pub struct QuoteService {
    store: Arc<QuoteStore>,
    logger: Arc<Logger>,
}

impl QuoteService {
    pub fn new(store: Arc<QuoteStore>, logger: Arc<Logger>) -> Self {
        Self { store, logger }
    }

    /// The underlying store (for saving at shutdown)
    pub fn store(&self) -> &Arc<QuoteStore> {
        &self.store
    }

    /// Validate and store a new quote.
    pub fn add(&self, quote: Quote) -> StoreResult<StoredQuote> {
        let result = validate_quote(&quote).and_then(|()| self.store.add(quote));

        match &result {
            Ok(stored) => {
                let id = stored.id.to_string();
                self.logger.info(
                    "QUOTE_ADDED",
                    &[
                        ("author", stored.author.as_str()),
                        ("id", id.as_str()),
                        ("text", stored.text.as_str()),
                    ],
                );
            }
            Err(e) => self.report("add", e),
        }
        result
    }

    /// All quotes, or only those whose author matches exactly.
    ///
    /// An empty `author` means no filter. An empty store is still an error;
    /// a filter that matches nothing is not.
    pub fn list(&self, author: Option<&str>) -> StoreResult<Vec<StoredQuote>> {
        let quotes = self.store.list_stored().inspect_err(|e| self.report("list", e))?;
        let quotes = match author.filter(|a| !a.is_empty()) {
            Some(author) => filter_by_author(quotes, author),
            None => quotes,
        };

        let count = quotes.len().to_string();
        self.logger.trace(
            "QUOTES_LISTED",
            &[("author", author.unwrap_or("")), ("count", count.as_str())],
        );
        Ok(quotes)
    }

    pub fn random(&self) -> StoreResult<Quote> {
        let quote = self.store.random().inspect_err(|e| self.report("random", e))?;
        self.logger.trace("QUOTE_RANDOM", &[]);
        Ok(quote)
    }

    /// Delete by a raw (unparsed) identifier.
    pub fn delete(&self, raw_id: &str) -> StoreResult<QuoteId> {
        let result = parse_id(raw_id).and_then(|id| self.store.delete(id).map(|()| id));

        match &result {
            Ok(id) => {
                let id = id.to_string();
                self.logger.info("QUOTE_DELETED", &[("id", id.as_str())]);
            }
            Err(e) => self.report("delete", e),
        }
        result
    }

    /// Log a failed operation: WARN when recoverable, ERROR otherwise.
    pub fn report(&self, operation: &str, err: &StoreError) {
        let message = err.to_string();
        let fields = [
            ("code", err.code()),
            ("error", message.as_str()),
            ("operation", operation),
        ];
        if err.is_recoverable() {
            self.logger.warn("QUOTE_REQUEST_REJECTED", &fields);
        } else {
            self.logger.error("QUOTE_REQUEST_FAILED", &fields);
        }
    }
}

/// Parse a path identifier. Ids are positive integers.
pub fn parse_id(raw: &str) -> StoreResult<QuoteId> {
    match raw.trim().parse::<QuoteId>() {
        Ok(0) => Err(StoreError::InvalidInput("id must be positive".into())),
        Ok(id) => Ok(id),
        Err(e) => Err(StoreError::InvalidInput(format!("invalid id {:?}: {}", raw, e))),
    }
}

/// Reject quotes with no text.
pub fn validate_quote(quote: &Quote) -> StoreResult<()> {
    if quote.text.trim().is_empty() {
        return Err(StoreError::InvalidInput("quote text must not be empty".into()));
    }
    Ok(())
}

/// Keep only quotes by exactly `author` (case-sensitive).
pub fn filter_by_author(quotes: Vec<StoredQuote>, author: &str) -> Vec<StoredQuote> {
    quotes.into_iter().filter(|q| q.author == author).collect()
}
