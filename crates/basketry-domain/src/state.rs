//! Aggregate co-occurrence state and its transition function
//!
//! `AggregateState` is the only thing that survives a basket: how many baskets
//! were seen, how many contained each item, and how many contained each pair.
//! Counts are sums, so any order of application (or any partition followed by
//! [`AggregateState::merge`]) reaches the same state.
//!
//! The count maps are persistent (`im::HashMap`), so cloning a state is O(1)
//! and a clone shares structure with its source until either side is written.

use crate::{Basket, ItemId, ItemPair};
use im::HashMap;
use thiserror::Error;

/// Errors raised by state transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The basket total would exceed `u64::MAX`
    #[error("Counter overflow: basket total is at {total}")]
    CounterOverflow {
        /// Basket total at the time of the failed transition
        total: u64,
    },
}

/// Running basket, item and pair counts
///
/// Invariant: `pair_count(a, b) <= min(item_count(a), item_count(b)) <= total_baskets()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateState {
    total_baskets: u64,
    item_counts: HashMap<ItemId, u64>,
    pair_counts: HashMap<ItemPair, u64>,
}

impl AggregateState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state by recording every basket in turn
    pub fn from_baskets<'a, I>(baskets: I) -> Result<Self, StateError>
    where
        I: IntoIterator<Item = &'a Basket>,
    {
        let mut state = Self::new();
        for basket in baskets {
            state.record(basket)?;
        }
        Ok(state)
    }

    /// Pure transition: the state after one more basket
    ///
    /// Leaves `self` untouched and returns the successor state. The successor
    /// shares every untouched entry with `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use basketry_domain::{AggregateState, Basket};
    ///
    /// let empty = AggregateState::new();
    /// let next = empty.apply(&Basket::new("T1", ["A", "B"])).unwrap();
    ///
    /// assert_eq!(empty.total_baskets(), 0);
    /// assert_eq!(next.total_baskets(), 1);
    /// assert_eq!(next.distinct_pairs(), 1);
    /// ```
    pub fn apply(&self, basket: &Basket) -> Result<Self, StateError> {
        let mut next = self.clone();
        next.record(basket)?;
        Ok(next)
    }

    /// In-place transition: add one basket to the counts
    ///
    /// Costs O(k²) for a basket of `k` items regardless of how much history
    /// the state holds. Either every counter moves or none does.
    pub fn record(&mut self, basket: &Basket) -> Result<(), StateError> {
        // Item and pair counts never exceed the total, so this one check
        // covers every counter touched below.
        let total = self
            .total_baskets
            .checked_add(1)
            .ok_or(StateError::CounterOverflow { total: self.total_baskets })?;

        self.total_baskets = total;
        for item in basket.items() {
            *self.item_counts.entry(item.clone()).or_insert(0) += 1;
        }
        for pair in basket.pairs() {
            *self.pair_counts.entry(pair).or_insert(0) += 1;
        }
        Ok(())
    }

    /// Add the counts of a state built over a disjoint set of baskets
    ///
    /// Merging per-partition states gives the same result as recording every
    /// basket into a single state.
    pub fn merge(&mut self, other: &AggregateState) -> Result<(), StateError> {
        let total = self
            .total_baskets
            .checked_add(other.total_baskets)
            .ok_or(StateError::CounterOverflow { total: self.total_baskets })?;

        self.total_baskets = total;
        for (item, count) in &other.item_counts {
            *self.item_counts.entry(item.clone()).or_insert(0) += count;
        }
        for (pair, count) in &other.pair_counts {
            *self.pair_counts.entry(pair.clone()).or_insert(0) += count;
        }
        Ok(())
    }

    /// Number of baskets recorded
    pub fn total_baskets(&self) -> u64 {
        self.total_baskets
    }

    /// Number of baskets containing the item (0 if never seen)
    pub fn item_count(&self, item: &ItemId) -> u64 {
        self.item_counts.get(item).copied().unwrap_or(0)
    }

    /// Number of baskets containing both items of the pair (0 if never seen)
    pub fn pair_count(&self, pair: &ItemPair) -> u64 {
        self.pair_counts.get(pair).copied().unwrap_or(0)
    }

    /// Every observed item with its count, in no particular order
    pub fn items(&self) -> impl Iterator<Item = (&ItemId, u64)> {
        self.item_counts.iter().map(|(item, count)| (item, *count))
    }

    /// Every observed pair with its count, in no particular order
    ///
    /// Only pairs with a nonzero count are ever stored.
    pub fn pairs(&self) -> impl Iterator<Item = (&ItemPair, u64)> {
        self.pair_counts.iter().map(|(pair, count)| (pair, *count))
    }

    /// Number of distinct items observed
    pub fn distinct_items(&self) -> usize {
        self.item_counts.len()
    }

    /// Number of distinct pairs observed
    pub fn distinct_pairs(&self) -> usize {
        self.pair_counts.len()
    }

    /// Whether no basket has been recorded
    pub fn is_empty(&self) -> bool {
        self.total_baskets == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> ItemPair {
        ItemPair::new(ItemId::new(a), ItemId::new(b)).unwrap()
    }

    fn scenario() -> Vec<Basket> {
        vec![
            Basket::new("T1", ["A", "B"]),
            Basket::new("T2", ["A", "B"]),
            Basket::new("T3", ["A", "C"]),
        ]
    }

    #[test]
    fn test_scenario_counts() {
        let state = AggregateState::from_baskets(&scenario()).unwrap();

        assert_eq!(state.total_baskets(), 3);
        assert_eq!(state.item_count(&ItemId::new("A")), 3);
        assert_eq!(state.item_count(&ItemId::new("B")), 2);
        assert_eq!(state.item_count(&ItemId::new("C")), 1);
        assert_eq!(state.pair_count(&pair("A", "B")), 2);
        assert_eq!(state.pair_count(&pair("A", "C")), 1);
        assert_eq!(state.pair_count(&pair("B", "C")), 0);
        assert_eq!(state.distinct_pairs(), 2);
    }

    #[test]
    fn test_apply_leaves_source_untouched() {
        let state = AggregateState::from_baskets(&scenario()).unwrap();
        let next = state.apply(&Basket::new("T4", ["B", "C"])).unwrap();

        assert_eq!(state.total_baskets(), 3);
        assert_eq!(next.total_baskets(), 4);
        assert_eq!(next.pair_count(&pair("B", "C")), 1);
    }

    #[test]
    fn test_single_item_basket_counts_item_only() {
        let mut state = AggregateState::new();
        state.record(&Basket::new("T1", ["A"])).unwrap();

        assert_eq!(state.total_baskets(), 1);
        assert_eq!(state.item_count(&ItemId::new("A")), 1);
        assert_eq!(state.distinct_pairs(), 0);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let baskets = scenario();
        let whole = AggregateState::from_baskets(&baskets).unwrap();

        let mut left = AggregateState::from_baskets(&baskets[..1]).unwrap();
        let right = AggregateState::from_baskets(&baskets[1..]).unwrap();
        left.merge(&right).unwrap();

        assert_eq!(left, whole);
    }

    #[test]
    fn test_overflow_leaves_state_unchanged() {
        let mut state = AggregateState {
            total_baskets: u64::MAX,
            ..Default::default()
        };
        let before = state.clone();

        let result = state.record(&Basket::new("T1", ["A", "B"]));

        assert_eq!(result, Err(StateError::CounterOverflow { total: u64::MAX }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_clone_is_independent_of_later_writes() {
        let mut state = AggregateState::from_baskets(&scenario()).unwrap();
        let held = state.clone();

        state.record(&Basket::new("T4", ["A", "B"])).unwrap();

        assert_eq!(held.total_baskets(), 3);
        assert_eq!(held.pair_count(&pair("A", "B")), 2);
        assert_eq!(state.pair_count(&pair("A", "B")), 3);
        assert_eq!(state.pair_count(&pair("A", "C")), held.pair_count(&pair("A", "C")));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_baskets() -> impl Strategy<Value = Vec<Basket>> {
        prop::collection::vec(
            prop::collection::btree_set("[A-H]", 1..6),
            0..40,
        )
        .prop_map(|sets| {
            sets.into_iter()
                .enumerate()
                .map(|(i, items)| Basket::new(format!("T{}", i), items))
                .collect()
        })
    }

    proptest! {
        /// Property: bulk construction equals folding the pure transition
        #[test]
        fn test_bulk_equals_incremental(baskets in arb_baskets()) {
            let bulk = AggregateState::from_baskets(&baskets).unwrap();
            let incremental = baskets
                .iter()
                .try_fold(AggregateState::new(), |state, basket| state.apply(basket))
                .unwrap();

            prop_assert_eq!(bulk, incremental);
        }

        /// Property: application order does not matter
        #[test]
        fn test_order_independence(baskets in arb_baskets()) {
            let forward = AggregateState::from_baskets(&baskets).unwrap();
            let reversed = AggregateState::from_baskets(baskets.iter().rev()).unwrap();

            prop_assert_eq!(forward, reversed);
        }

        /// Property: merging any split equals the single pass
        #[test]
        fn test_partition_merge(baskets in arb_baskets(), split in 0usize..40) {
            let split = split.min(baskets.len());
            let whole = AggregateState::from_baskets(&baskets).unwrap();

            let mut left = AggregateState::from_baskets(&baskets[..split]).unwrap();
            left.merge(&AggregateState::from_baskets(&baskets[split..]).unwrap()).unwrap();

            prop_assert_eq!(left, whole);
        }

        /// Property: pair counts are bounded by item counts, which are bounded by the total
        #[test]
        fn test_count_bounds(baskets in arb_baskets()) {
            let state = AggregateState::from_baskets(&baskets).unwrap();

            for (pair, count) in state.pairs() {
                let bound = state.item_count(pair.first()).min(state.item_count(pair.second()));
                prop_assert!(count <= bound);
            }
            for (_, count) in state.items() {
                prop_assert!(count <= state.total_baskets());
            }
        }
    }
}
