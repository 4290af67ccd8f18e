//! Incremental updates straight from line items

use crate::{AffinityCache, CacheConfig, CacheError, CacheStatistics, Snapshot};
use basketry_domain::Basket;
use basketry_extractor::{BasketExtractor, ExtractorConfig, LineItem};

/// Outcome of feeding line items into the cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Baskets produced by the extractor
    pub baskets_read: usize,
    /// Baskets that moved the counts
    pub baskets_applied: usize,
    /// Malformed line items skipped by the extractor
    pub records_skipped: usize,
}

/// Couples basket extraction with an [`AffinityCache`]
///
/// Use [`initialize_from_line_items`](Self::initialize_from_line_items) once
/// for history, then [`process_line_items`](Self::process_line_items) as new
/// transactions arrive. No call ever rescans earlier data.
///
/// # Examples
///
/// ```
/// use basketry_cache::IncrementalUpdater;
/// use basketry_extractor::LineItem;
///
/// let updater = IncrementalUpdater::default();
/// updater
///     .initialize_from_line_items(vec![LineItem::new("T1", "A"), LineItem::new("T1", "B")])
///     .unwrap();
///
/// let report = updater
///     .process_line_items(vec![LineItem::new("T2", "A"), LineItem::new("T2", "C")])
///     .unwrap();
///
/// assert_eq!(report.baskets_applied, 1);
/// assert_eq!(updater.statistics().total_baskets, 2);
/// ```
#[derive(Debug, Default)]
pub struct IncrementalUpdater {
    extractor_config: ExtractorConfig,
    cache: AffinityCache,
}

impl IncrementalUpdater {
    /// Create an updater with explicit extractor and cache configuration
    pub fn new(extractor_config: ExtractorConfig, cache_config: CacheConfig) -> Self {
        Self {
            extractor_config,
            cache: AffinityCache::new(cache_config),
        }
    }

    /// The underlying cache
    pub fn cache(&self) -> &AffinityCache {
        &self.cache
    }

    /// Replace all counts with those built from historical line items
    ///
    /// Extraction finishes before anything is published, so a malformed
    /// record under the abort policy leaves the cache as it was.
    pub fn initialize_from_line_items<I>(&self, records: I) -> Result<UpdateReport, CacheError>
    where
        I: IntoIterator<Item = LineItem>,
    {
        let mut extractor = BasketExtractor::new(records, self.extractor_config.clone());
        let baskets: Vec<Basket> = extractor.by_ref().collect::<Result<_, _>>()?;
        let baskets_applied = self.cache.initialize(&baskets)?;

        Ok(UpdateReport {
            baskets_read: baskets.len(),
            baskets_applied,
            records_skipped: extractor.skipped(),
        })
    }

    /// Apply new line items as they arrive
    ///
    /// Baskets are applied as soon as the extractor closes them, so with
    /// contiguous grouping memory stays bounded by one transaction. On error,
    /// baskets already applied stay applied.
    pub fn process_line_items<I>(&self, records: I) -> Result<UpdateReport, CacheError>
    where
        I: IntoIterator<Item = LineItem>,
    {
        let mut extractor = BasketExtractor::new(records, self.extractor_config.clone());
        let mut report = UpdateReport::default();

        for basket in extractor.by_ref() {
            let basket = basket?;
            report.baskets_read += 1;
            if self.cache.apply(&basket)? {
                report.baskets_applied += 1;
            }
        }

        report.records_skipped = extractor.skipped();
        tracing::debug!(
            baskets = report.baskets_applied,
            skipped = report.records_skipped,
            "Processed line items"
        );
        Ok(report)
    }

    /// Apply one already-built basket
    pub fn process_basket(&self, basket: &Basket) -> Result<bool, CacheError> {
        self.cache.apply(basket)
    }

    /// Take an immutable view of the counts
    pub fn snapshot(&self) -> Snapshot {
        self.cache.snapshot()
    }

    /// Summary statistics over the current counts
    pub fn statistics(&self) -> CacheStatistics {
        self.cache.statistics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basketry_extractor::{ExtractorError, MissingField};

    fn history() -> Vec<LineItem> {
        vec![
            LineItem::new("T1", "A"),
            LineItem::new("T1", "B"),
            LineItem::new("T2", "A"),
            LineItem::new("T2", "B"),
            LineItem::new("T3", "A"),
            LineItem::new("T3", "C"),
        ]
    }

    #[test]
    fn test_initialize_from_line_items() {
        let updater = IncrementalUpdater::default();
        let report = updater.initialize_from_line_items(history()).unwrap();

        assert_eq!(
            report,
            UpdateReport {
                baskets_read: 3,
                baskets_applied: 3,
                records_skipped: 0,
            }
        );
        assert_eq!(updater.snapshot().total_baskets(), 3);
    }

    #[test]
    fn test_split_history_matches_full_history() {
        let full = IncrementalUpdater::default();
        full.initialize_from_line_items(history()).unwrap();

        let split = IncrementalUpdater::default();
        let records = history();
        split.initialize_from_line_items(records[..2].to_vec()).unwrap();
        split.process_line_items(records[2..].to_vec()).unwrap();

        assert_eq!(*full.snapshot(), *split.snapshot());
    }

    #[test]
    fn test_skipped_records_are_reported() {
        let updater = IncrementalUpdater::default();
        let mut records = history();
        records.push(LineItem {
            transaction_id: None,
            item_id: Some("D".to_string()),
        });

        let report = updater.process_line_items(records).unwrap();

        assert_eq!(report.records_skipped, 1);
        assert_eq!(report.baskets_applied, 3);
    }

    #[test]
    fn test_abort_policy_leaves_cache_untouched_on_initialize() {
        let updater = IncrementalUpdater::new(ExtractorConfig::strict(), CacheConfig::default());
        updater.process_basket(&Basket::new("T0", ["X"])).unwrap();

        let mut records = history();
        records.insert(1, LineItem::default());
        let result = updater.initialize_from_line_items(records);

        assert_eq!(
            result,
            Err(CacheError::Extraction(ExtractorError::MalformedRecord {
                position: 1,
                missing: MissingField::Both,
            }))
        );
        assert_eq!(updater.snapshot().total_baskets(), 1);
    }

    #[test]
    fn test_streaming_applies_closed_baskets_before_error() {
        let updater = IncrementalUpdater::new(
            ExtractorConfig {
                malformed_policy: basketry_extractor::MalformedPolicy::Abort,
                grouping: basketry_extractor::Grouping::Contiguous,
            },
            CacheConfig::default(),
        );
        let records = vec![
            LineItem::new("T1", "A"),
            LineItem::new("T1", "B"),
            LineItem::new("T2", "A"),
            LineItem::default(),
        ];

        let result = updater.process_line_items(records);

        assert!(matches!(result, Err(CacheError::Extraction(_))));
        assert_eq!(updater.snapshot().total_baskets(), 1);
    }
}
