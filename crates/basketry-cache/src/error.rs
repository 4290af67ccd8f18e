//! Error types for cache operations

use basketry_domain::{StateError, TransactionId};
use basketry_extractor::ExtractorError;
use thiserror::Error;

/// Errors that can occur while applying baskets
///
/// Whatever the variant, the basket that failed left no trace in the counts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// An empty basket arrived under [`crate::EmptyBasketPolicy::Reject`]
    #[error("Empty basket rejected: transaction {0}")]
    EmptyBasket(TransactionId),

    /// The state transition failed
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// A basket inside a batch failed; earlier baskets remain applied
    #[error("Batch failed at basket {index}: {source}")]
    Batch {
        /// Zero-based index of the failing basket within the batch
        index: usize,
        /// Failure of that basket
        source: Box<CacheError>,
    },

    /// Line items could not be turned into baskets
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractorError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
