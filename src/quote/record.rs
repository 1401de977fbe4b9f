//! Quote record types and their JSON shape.
//!
//! The JSON keys are `quote`, `author` and `id`; the persisted file and the
//! HTTP bodies share them.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store. Always positive.
pub type QuoteId = u64;

/// A quote without an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote body
    #[serde(rename = "quote")]
    pub text: String,

    /// Who said it (may be empty)
    #[serde(default)]
    pub author: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    /// Attach a store-assigned identifier.
    pub fn with_id(self, id: QuoteId) -> StoredQuote {
        StoredQuote {
            text: self.text,
            author: self.author,
            id,
        }
    }
}

/// A quote as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuote {
    #[serde(rename = "quote")]
    pub text: String,

    pub author: String,

    pub id: QuoteId,
}

impl StoredQuote {
    /// Drop the identifier, keeping the content.
    pub fn to_quote(&self) -> Quote {
        Quote {
            text: self.text.clone(),
            author: self.author.clone(),
        }
    }
}

impl From<StoredQuote> for Quote {
    fn from(stored: StoredQuote) -> Self {
        Quote {
            text: stored.text,
            author: stored.author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_quote_json_keys() {
        let stored = Quote::new("Simple quote", "Simple author").with_id(7);
        let value = serde_json::to_value(&stored).unwrap();

        assert_eq!(value["quote"], "Simple quote");
        assert_eq!(value["author"], "Simple author");
        assert_eq!(value["id"], 7);
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_quote_author_defaults_to_empty() {
        let quote: Quote = serde_json::from_str(r#"{"quote":"Anonymous wisdom"}"#).unwrap();
        assert_eq!(quote.text, "Anonymous wisdom");
        assert_eq!(quote.author, "");
    }

    #[test]
    fn test_quote_ignores_client_supplied_id() {
        // An incoming body cannot smuggle an id in; it is simply not part of Quote.
        let quote: Quote =
            serde_json::from_str(r#"{"quote":"Q","author":"A","id":99}"#).unwrap();
        assert_eq!(quote.with_id(1).id, 1);
    }

    #[test]
    fn test_stored_quote_requires_id() {
        let result: Result<StoredQuote, _> = serde_json::from_str(r#"{"quote":"Q","author":"A"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_strip_id() {
        let stored = StoredQuote {
            text: "Q".into(),
            author: "A".into(),
            id: 3,
        };
        assert_eq!(stored.to_quote(), Quote::new("Q", "A"));
        assert_eq!(Quote::from(stored), Quote::new("Q", "A"));
    }
}
