//! Query error types

use basketry_domain::{ItemId, MetricError};
use thiserror::Error;

/// Errors that can occur while answering affinity queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Recommendations requested for an item the snapshot has never seen
    #[error("Unknown item: '{0}' has not been observed")]
    UnknownItem(ItemId),

    /// Query parameters out of range
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A metric could not be computed
    #[error(transparent)]
    Metric(#[from] MetricError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
