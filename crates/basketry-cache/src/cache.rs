//! The affinity cache: single writer, snapshot readers

use crate::{CacheConfig, CacheError, CacheStatistics, EmptyBasketPolicy};
use basketry_domain::{AggregateState, Basket};
use std::borrow::Borrow;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Immutable view of the aggregate counts at one point in time
pub type Snapshot = Arc<AggregateState>;

/// Owner of the running co-occurrence counts
///
/// Exactly one logical stream should call [`apply`](Self::apply) and friends;
/// any number of readers may call [`snapshot`](Self::snapshot) concurrently.
///
/// The current state sits behind an `Arc`. A snapshot is a clone of that
/// `Arc`, taken in O(1). The writer mutates through `Arc::make_mut`. When a
/// snapshot from before the write is still held, the state is cloned first;
/// its count maps are persistent, so that clone is O(1) and the write copies
/// only the map nodes on the paths it touches. A held snapshot never makes a
/// write pay for the size of the history.
/// The write lock covers exactly one basket, so no reader can ever see a
/// basket's item counts without its pair counts.
///
/// # Examples
///
/// ```
/// use basketry_cache::AffinityCache;
/// use basketry_domain::Basket;
///
/// let cache = AffinityCache::default_config();
/// cache.initialize(&[Basket::new("T1", ["A", "B"])]).unwrap();
///
/// let before = cache.snapshot();
/// cache.apply(&Basket::new("T2", ["A", "C"])).unwrap();
///
/// assert_eq!(before.total_baskets(), 1);
/// assert_eq!(cache.snapshot().total_baskets(), 2);
/// ```
#[derive(Debug)]
pub struct AffinityCache {
    config: CacheConfig,
    state: RwLock<Snapshot>,
}

impl AffinityCache {
    /// Create an empty cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: RwLock::new(Arc::new(AggregateState::new())),
        }
    }

    /// Create an empty cache with default configuration
    pub fn default_config() -> Self {
        Self::new(CacheConfig::default())
    }

    /// Get the cache configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Replace all counts with those of a historical basket set
    ///
    /// The new state is built aside and published in one step. Readers see
    /// either the old state or the complete new one, and a failure leaves the
    /// old state in place.
    ///
    /// Returns the number of baskets counted.
    pub fn initialize<I, B>(&self, baskets: I) -> Result<usize, CacheError>
    where
        I: IntoIterator<Item = B>,
        B: Borrow<Basket>,
    {
        let mut fresh = AggregateState::new();
        let mut counted = 0;

        for (index, basket) in baskets.into_iter().enumerate() {
            let basket = basket.borrow();
            let admitted = self
                .admit(basket)
                .and_then(|admitted| {
                    if admitted {
                        fresh.record(basket)?;
                    }
                    Ok(admitted)
                })
                .map_err(|e| CacheError::Batch {
                    index,
                    source: Box::new(e),
                })?;
            if admitted {
                counted += 1;
            }
        }

        tracing::info!(
            baskets = counted,
            items = fresh.distinct_items(),
            pairs = fresh.distinct_pairs(),
            "Affinity cache initialized"
        );

        *self.write() = Arc::new(fresh);
        Ok(counted)
    }

    /// Add one basket to the counts
    ///
    /// Costs O(k²) map updates in the basket size, whether or not snapshots
    /// are held. Returns
    /// `false` when the basket was empty and skipped by policy.
    ///
    /// # Errors
    ///
    /// On error the counts are exactly as they were before the call.
    pub fn apply(&self, basket: &Basket) -> Result<bool, CacheError> {
        if !self.admit(basket)? {
            tracing::debug!(transaction = %basket.transaction_id(), "Skipping empty basket");
            return Ok(false);
        }

        let mut guard = self.write();
        Arc::make_mut(&mut guard).record(basket)?;

        tracing::trace!(
            transaction = %basket.transaction_id(),
            items = basket.len(),
            "Applied basket"
        );
        Ok(true)
    }

    /// Apply baskets in order, one at a time
    ///
    /// Identical to calling [`apply`](Self::apply) for each basket. Stops at
    /// the first failure; baskets before it remain applied and the error
    /// carries the failing index. Returns the number of baskets counted.
    pub fn apply_batch<I, B>(&self, baskets: I) -> Result<usize, CacheError>
    where
        I: IntoIterator<Item = B>,
        B: Borrow<Basket>,
    {
        let mut counted = 0;
        for (index, basket) in baskets.into_iter().enumerate() {
            let applied = self.apply(basket.borrow()).map_err(|e| CacheError::Batch {
                index,
                source: Box::new(e),
            })?;
            if applied {
                counted += 1;
            }
        }

        tracing::debug!(baskets = counted, "Applied batch");
        Ok(counted)
    }

    /// Take an immutable, internally consistent view of the counts
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.read())
    }

    /// Number of baskets counted so far
    pub fn total_baskets(&self) -> u64 {
        self.read().total_baskets()
    }

    /// Summary statistics over the current counts
    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics::from_state(&self.snapshot())
    }

    /// Decide whether a basket goes through the transition
    fn admit(&self, basket: &Basket) -> Result<bool, CacheError> {
        if !basket.is_empty() {
            return Ok(true);
        }

        match self.config.empty_basket_policy {
            EmptyBasketPolicy::Skip => Ok(false),
            EmptyBasketPolicy::Count => Ok(true),
            EmptyBasketPolicy::Reject => Err(CacheError::EmptyBasket(basket.transaction_id().clone())),
        }
    }

    // Every mutation is validated before it starts, so a poisoned lock still
    // guards a consistent state.
    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AffinityCache {
    fn default() -> Self {
        Self::default_config()
    }
}
