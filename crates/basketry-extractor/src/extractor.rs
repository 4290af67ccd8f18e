//! Basket extraction from line-item streams

use crate::{ExtractorConfig, ExtractorError, Grouping, LineItem, MalformedPolicy};
use basketry_domain::{Basket, ItemId, TransactionId};
use std::collections::{BTreeSet, HashMap};

/// Groups line items into baskets
///
/// A finite iterator of `Result<Basket, ExtractorError>`. With the
/// default [`MalformedPolicy::Skip`] it never yields an error. With
/// [`MalformedPolicy::Abort`] it yields exactly one error and then ends.
///
/// How lazy it is depends on [`Grouping`]. The default
/// [`Grouping::ByTransaction`] consumes the entire input on the first call to
/// `next` and holds every basket in memory until it is yielded, since a
/// transaction's lines may be scattered anywhere in the input. Use
/// [`Grouping::Contiguous`] (or [`ExtractorConfig::streaming`]) to read only
/// as far as the end of the current basket.
///
/// # Examples
///
/// ```
/// use basketry_extractor::{BasketExtractor, ExtractorConfig, LineItem};
///
/// let records = vec![
///     LineItem::new("T1", "milk"),
///     LineItem::new("T2", "eggs"),
///     LineItem::new("T1", "bread"),
///     LineItem::new("T1", "milk"),
/// ];
///
/// let baskets: Vec<_> = BasketExtractor::new(records, ExtractorConfig::default())
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(baskets.len(), 2);
/// assert_eq!(baskets[0].transaction_id().as_str(), "T1");
/// assert_eq!(baskets[0].len(), 2);
/// ```
pub struct BasketExtractor<I> {
    records: I,
    config: ExtractorConfig,
    position: usize,
    skipped: usize,
    grouped: Option<std::vec::IntoIter<Basket>>,
    pending: Option<(TransactionId, BTreeSet<ItemId>)>,
    finished: bool,
}

impl<I> BasketExtractor<I>
where
    I: Iterator<Item = LineItem>,
{
    /// Create an extractor over a sequence of line items
    pub fn new<R>(records: R, config: ExtractorConfig) -> Self
    where
        R: IntoIterator<Item = LineItem, IntoIter = I>,
    {
        Self {
            records: records.into_iter(),
            config,
            position: 0,
            skipped: 0,
            grouped: None,
            pending: None,
            finished: false,
        }
    }

    /// Number of malformed records skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of records read so far
    pub fn records_read(&self) -> usize {
        self.position
    }

    /// Pull the next well-formed record, applying the malformed policy
    fn next_record(&mut self) -> Option<Result<(TransactionId, ItemId), ExtractorError>> {
        loop {
            let record = self.records.next()?;
            let position = self.position;
            self.position += 1;

            match record.identifiers() {
                Ok(ids) => return Some(Ok(ids)),
                Err(missing) => match self.config.malformed_policy {
                    MalformedPolicy::Skip => {
                        self.skipped += 1;
                        tracing::warn!(position, %missing, "Skipping malformed line item");
                    }
                    MalformedPolicy::Abort => {
                        return Some(Err(ExtractorError::MalformedRecord { position, missing }));
                    }
                },
            }
        }
    }

    /// Read the whole input and group it by transaction id, first-seen order
    fn group_all(&mut self) -> Result<Vec<Basket>, ExtractorError> {
        let mut groups: Vec<(TransactionId, BTreeSet<ItemId>)> = Vec::new();
        let mut index: HashMap<TransactionId, usize> = HashMap::new();

        while let Some(record) = self.next_record() {
            let (txn, item) = record?;
            match index.get(&txn).copied() {
                Some(slot) => {
                    groups[slot].1.insert(item);
                }
                None => {
                    index.insert(txn.clone(), groups.len());
                    groups.push((txn, BTreeSet::from([item])));
                }
            }
        }

        tracing::debug!(
            baskets = groups.len(),
            records = self.position,
            skipped = self.skipped,
            "Grouped line items by transaction"
        );

        Ok(groups
            .into_iter()
            .map(|(txn, items)| Basket::new(txn, items))
            .collect())
    }

    fn next_grouped(&mut self) -> Option<Result<Basket, ExtractorError>> {
        if self.grouped.is_none() {
            match self.group_all() {
                Ok(baskets) => self.grouped = Some(baskets.into_iter()),
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }

        let next = self.grouped.as_mut().and_then(Iterator::next);
        if next.is_none() {
            self.finished = true;
        }
        next.map(Ok)
    }

    fn next_contiguous(&mut self) -> Option<Result<Basket, ExtractorError>> {
        loop {
            match self.next_record() {
                Some(Ok((txn, item))) => {
                    let same = matches!(&self.pending, Some((current, _)) if *current == txn);
                    if same {
                        if let Some((_, items)) = self.pending.as_mut() {
                            items.insert(item);
                        }
                        continue;
                    }

                    let closed = self.pending.replace((txn, BTreeSet::from([item])));
                    if let Some((txn, items)) = closed {
                        return Some(Ok(Basket::new(txn, items)));
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    self.pending = None;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    return self.pending.take().map(|(txn, items)| Ok(Basket::new(txn, items)));
                }
            }
        }
    }
}

impl<I> Iterator for BasketExtractor<I>
where
    I: Iterator<Item = LineItem>,
{
    type Item = Result<Basket, ExtractorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.config.grouping {
            Grouping::ByTransaction => self.next_grouped(),
            Grouping::Contiguous => self.next_contiguous(),
        }
    }
}

/// Extract every basket from a finite collection of line items
///
/// # Errors
///
/// Returns the first [`ExtractorError::MalformedRecord`] when the policy is
/// [`MalformedPolicy::Abort`].
pub fn extract_baskets<I>(records: I, config: ExtractorConfig) -> Result<Vec<Basket>, ExtractorError>
where
    I: IntoIterator<Item = LineItem>,
{
    BasketExtractor::new(records, config).collect()
}
