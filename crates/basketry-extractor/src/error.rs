//! Error types for the Extractor

use std::fmt;
use thiserror::Error;

/// Which identifier a malformed line item is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// No transaction id
    TransactionId,
    /// No item id
    ItemId,
    /// Neither id present
    Both,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::TransactionId => f.write_str("transaction_id"),
            MissingField::ItemId => f.write_str("item_id"),
            MissingField::Both => f.write_str("transaction_id and item_id"),
        }
    }
}

/// Errors that can occur during basket extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// A line item lacks one or both identifiers
    #[error("Malformed record at position {position}: missing {missing}")]
    MalformedRecord {
        /// Zero-based position of the record in the input
        position: usize,
        /// Missing identifier(s)
        missing: MissingField,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
