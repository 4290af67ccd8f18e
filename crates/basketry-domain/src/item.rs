//! Item and transaction identifiers, and the canonical unordered item pair

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque product identifier
///
/// Ordering is lexicographic on the underlying string. That order is the
/// total order used to canonicalize pairs, so it must never change.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an item identifier from any string-like value
    ///
    /// # Examples
    ///
    /// ```
    /// use basketry_domain::ItemId;
    ///
    /// let id = ItemId::new("P001");
    /// assert_eq!(id.as_str(), "P001");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Opaque transaction identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create a transaction identifier from any string-like value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Unordered pair of distinct items in canonical form (`first < second`)
///
/// The derived ordering compares `first`, then `second`, which is the
/// canonical pair order used to break ranking ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemPair {
    first: ItemId,
    second: ItemId,
}

impl ItemPair {
    /// Build the canonical pair for two items, in either order
    ///
    /// Returns `None` when both sides name the same item.
    ///
    /// # Examples
    ///
    /// ```
    /// use basketry_domain::{ItemId, ItemPair};
    ///
    /// let ab = ItemPair::new(ItemId::new("B"), ItemId::new("A")).unwrap();
    /// assert_eq!(ab.first().as_str(), "A");
    /// assert!(ItemPair::new(ItemId::new("A"), ItemId::new("A")).is_none());
    /// ```
    pub fn new(a: ItemId, b: ItemId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The smaller item under the canonical order
    pub fn first(&self) -> &ItemId {
        &self.first
    }

    /// The larger item under the canonical order
    pub fn second(&self) -> &ItemId {
        &self.second
    }

    /// Check whether the pair contains the item
    pub fn contains(&self, item: &ItemId) -> bool {
        &self.first == item || &self.second == item
    }

    /// The other member of the pair, if `item` is one of them
    pub fn counterpart(&self, item: &ItemId) -> Option<&ItemId> {
        if &self.first == item {
            Some(&self.second)
        } else if &self.second == item {
            Some(&self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for ItemPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
