//! Basketry Domain Layer
//!
//! This crate contains the core model for product affinity analysis: the
//! identifiers, the basket value object, the aggregate co-occurrence state and
//! the pure metric functions derived from it. It performs no I/O and holds no
//! locks; the cache and query crates build on top of it.
//!
//! ## Key Concepts
//!
//! - **Basket**: the distinct items bought together in one transaction
//! - **Aggregate state**: basket total, per-item counts, per-pair counts
//! - **Support**: fraction of baskets containing an item or pair
//! - **Confidence(A→B)**: estimated probability of B given A
//! - **Lift**: observed co-occurrence over co-occurrence expected by chance
//!
//! ## Equivalence
//!
//! Counts are plain sums. Recording baskets one at a time, in bulk, in any
//! order, or in partitions that are merged afterwards always yields the same
//! [`AggregateState`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod basket;
pub mod item;
pub mod metrics;
pub mod state;

// Re-exports for convenience
pub use basket::Basket;
pub use item::{ItemId, ItemPair, TransactionId};
pub use metrics::{AffinityRecord, Metric, MetricError};
pub use state::{AggregateState, StateError};
