//! Summary statistics over the cached counts

use basketry_domain::{AggregateState, ItemId, ItemPair};
use serde::Serialize;

/// Snapshot-level summary of the cache contents
///
/// "Most frequent" ties resolve to the smallest identifier, so the summary
/// is deterministic for a given state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStatistics {
    /// Baskets counted
    pub total_baskets: u64,

    /// Distinct items observed
    pub distinct_items: usize,

    /// Distinct pairs observed
    pub distinct_pairs: usize,

    /// Item present in the most baskets, with its count
    pub most_frequent_item: Option<(ItemId, u64)>,

    /// Pair present in the most baskets, with its count
    pub most_frequent_pair: Option<(ItemPair, u64)>,
}

impl CacheStatistics {
    /// Compute statistics for a state
    pub fn from_state(state: &AggregateState) -> Self {
        let most_frequent_item = state
            .items()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(item, count)| (item.clone(), count));

        let most_frequent_pair = state
            .pairs()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(pair, count)| (pair.clone(), count));

        Self {
            total_baskets: state.total_baskets(),
            distinct_items: state.distinct_items(),
            distinct_pairs: state.distinct_pairs(),
            most_frequent_item,
            most_frequent_pair,
        }
    }

    /// Generate a summary report of the statistics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Affinity Cache Statistics".to_string(),
            "=========================".to_string(),
            format!("Total baskets: {}", self.total_baskets),
            format!("Distinct items: {}", self.distinct_items),
            format!("Distinct pairs: {}", self.distinct_pairs),
        ];

        if let Some((item, count)) = &self.most_frequent_item {
            lines.push(format!("Most frequent item: {} ({} baskets)", item, count));
        }
        if let Some((pair, count)) = &self.most_frequent_pair {
            lines.push(format!("Most frequent pair: {} ({} baskets)", pair, count));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basketry_domain::Basket;

    #[test]
    fn test_empty_state() {
        let stats = CacheStatistics::from_state(&AggregateState::new());

        assert_eq!(stats, CacheStatistics::default());
        assert!(stats.summary().contains("Total baskets: 0"));
        assert!(!stats.summary().contains("Most frequent"));
    }

    #[test]
    fn test_scenario_statistics() {
        let state = AggregateState::from_baskets(&[
            Basket::new("T1", ["A", "B"]),
            Basket::new("T2", ["A", "B"]),
            Basket::new("T3", ["A", "C"]),
        ])
        .unwrap();

        let stats = CacheStatistics::from_state(&state);

        assert_eq!(stats.total_baskets, 3);
        assert_eq!(stats.distinct_items, 3);
        assert_eq!(stats.distinct_pairs, 2);
        assert_eq!(stats.most_frequent_item, Some((ItemId::new("A"), 3)));
        assert_eq!(
            stats.most_frequent_pair,
            Some((ItemPair::new("A".into(), "B".into()).unwrap(), 2))
        );
    }

    #[test]
    fn test_ties_pick_smallest_id() {
        let state = AggregateState::from_baskets(&[
            Basket::new("T1", ["C", "D"]),
            Basket::new("T2", ["A", "B"]),
        ])
        .unwrap();

        let stats = CacheStatistics::from_state(&state);

        assert_eq!(stats.most_frequent_item, Some((ItemId::new("A"), 1)));
        assert_eq!(
            stats.most_frequent_pair,
            Some((ItemPair::new("A".into(), "B".into()).unwrap(), 1))
        );
    }

    #[test]
    fn test_summary() {
        let state = AggregateState::from_baskets(&[Basket::new("T1", ["A", "B"])]).unwrap();
        let summary = CacheStatistics::from_state(&state).summary();

        assert!(summary.contains("Total baskets: 1"));
        assert!(summary.contains("Distinct pairs: 1"));
        assert!(summary.contains("Most frequent pair: (A, B) (1 baskets)"));
    }
}
