//! Basket module - the set of distinct items bought in one transaction

use crate::{ItemId, ItemPair, TransactionId};
use std::collections::BTreeSet;

/// Distinct items purchased together in one transaction
///
/// Baskets are immutable once built. Only the aggregate counts they feed
/// outlive them. Items are kept sorted so pair enumeration yields canonical
/// pairs without a separate sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket {
    transaction_id: TransactionId,
    items: BTreeSet<ItemId>,
}

impl Basket {
    /// Create a basket, collapsing repeated items into one
    ///
    /// # Examples
    ///
    /// ```
    /// use basketry_domain::Basket;
    ///
    /// let basket = Basket::new("T1", ["milk", "bread", "milk"]);
    /// assert_eq!(basket.len(), 2);
    /// ```
    pub fn new<T, I, S>(transaction_id: T, items: I) -> Self
    where
        T: Into<TransactionId>,
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        Self {
            transaction_id: transaction_id.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Transaction this basket was built from
    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    /// Items in ascending order
    pub fn items(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter()
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the basket holds no items at all
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check whether the basket contains an item
    pub fn contains(&self, item: &ItemId) -> bool {
        self.items.contains(item)
    }

    /// Every unordered pair of items, each in canonical form
    ///
    /// Yields `k * (k - 1) / 2` pairs for a basket of `k` items, in
    /// ascending pair order. Single-item baskets yield nothing.
    pub fn pairs(&self) -> impl Iterator<Item = ItemPair> + '_ {
        self.items.iter().enumerate().flat_map(move |(i, a)| {
            self.items
                .iter()
                .skip(i + 1)
                .filter_map(move |b| ItemPair::new(a.clone(), b.clone()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_items_collapse() {
        let basket = Basket::new("T1", ["A", "B", "A", "A"]);
        assert_eq!(basket.len(), 2);
        assert!(basket.contains(&ItemId::new("A")));
    }

    #[test]
    fn test_pairs_are_canonical_and_complete() {
        let basket = Basket::new("T1", ["C", "A", "B"]);
        let pairs: Vec<String> = basket.pairs().map(|p| p.to_string()).collect();

        assert_eq!(pairs, vec!["(A, B)", "(A, C)", "(B, C)"]);
    }

    #[test]
    fn test_single_item_has_no_pairs() {
        let basket = Basket::new("T1", ["A"]);
        assert_eq!(basket.pairs().count(), 0);
    }

    #[test]
    fn test_empty_basket() {
        let basket = Basket::new("T1", Vec::<&str>::new());
        assert!(basket.is_empty());
        assert_eq!(basket.pairs().count(), 0);
    }
}
