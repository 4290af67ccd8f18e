//! Basketry Cache
//!
//! Incremental co-occurrence counting for product affinity analysis.
//!
//! # Overview
//!
//! The cache owns the running counts: how many baskets were seen, how many
//! contained each item, and how many contained each pair. It supports:
//! - **Bulk load**: [`AffinityCache::initialize`] over historical baskets
//! - **Streaming**: [`AffinityCache::apply`] and [`AffinityCache::apply_batch`]
//!   as new transactions arrive, at O(k²) per basket of `k` items
//! - **Snapshots**: [`AffinityCache::snapshot`] hands readers an immutable
//!   view without blocking the writer for longer than one basket
//!
//! # Equivalence
//!
//! Any sequence of `apply`/`apply_batch` calls produces exactly the state that
//! `initialize` produces over the concatenation of the same baskets, in any
//! order. Batching never changes results.
//!
//! # Usage
//!
//! ```
//! use basketry_cache::{AffinityCache, CacheConfig};
//! use basketry_domain::{Basket, ItemId};
//!
//! let cache = AffinityCache::new(CacheConfig::default());
//! cache
//!     .initialize(&[Basket::new("T1", ["A", "B"]), Basket::new("T2", ["A", "B"])])
//!     .unwrap();
//! cache.apply(&Basket::new("T3", ["A", "C"])).unwrap();
//!
//! let snapshot = cache.snapshot();
//! assert_eq!(snapshot.total_baskets(), 3);
//! assert_eq!(snapshot.item_count(&ItemId::new("A")), 3);
//! println!("{}", cache.statistics().summary());
//! ```
//!
//! # Configuration
//!
//! The cache can be configured via TOML:
//!
//! ```toml
//! [cache]
//! empty_basket_policy = "skip"   # or "count", "reject"
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod statistics;
mod updater;

pub use cache::{AffinityCache, Snapshot};
pub use config::{CacheConfig, EmptyBasketPolicy};
pub use error::CacheError;
pub use statistics::CacheStatistics;
pub use updater::{IncrementalUpdater, UpdateReport};
