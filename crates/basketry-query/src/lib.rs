//! Basketry Query
//!
//! Ranked affinity queries over co-occurrence snapshots.
//!
//! # Overview
//!
//! The query engine is read-only. It takes an [`AggregateState`] (usually a
//! snapshot from `basketry-cache`) and answers two questions:
//!
//! - **Which pairs belong together?** [`AffinityQueryEngine::top_affinities`]
//!   filters pairs by support and confidence, then ranks them by a [`Metric`]
//! - **What goes with this item?** [`AffinityQueryEngine::recommendations_for`]
//!   ranks an item's counterparts by lift
//!
//! Ties are broken by support, then by pair (or counterpart) order, so a given
//! snapshot always produces the same ranking.
//!
//! # Configuration
//!
//! ```toml
//! [query]
//! metric = "lift"        # or "support", "confidence"
//! min_support = 0.01
//! min_confidence = 0.1
//! top_n = 10
//! ```
//!
//! [`AggregateState`]: basketry_domain::AggregateState
//! [`Metric`]: basketry_domain::Metric

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod types;

pub use config::AffinityQuery;
pub use engine::{recommendations_for, top_affinities, AffinityQueryEngine};
pub use error::QueryError;
pub use types::Recommendation;
