//! Query result types

use basketry_domain::ItemId;
use serde::{Deserialize, Serialize};

/// An item suggested alongside a queried item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The counterpart item being recommended
    pub item: ItemId,

    /// Fraction of baskets containing both items
    pub support: f64,

    /// Estimated P(recommended | queried)
    pub confidence: f64,

    /// Estimated P(queried | recommended)
    pub reverse_confidence: f64,

    /// Lift of the pair
    pub lift: f64,
}
