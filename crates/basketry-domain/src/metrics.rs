//! Affinity metrics: support, confidence and lift over an aggregate state
//!
//! All functions here are pure reads of an [`AggregateState`]. Nothing is
//! rounded; presentation is left to callers.
//!
//! Lift reads as follows (documented, not enforced):
//! - lift > 1: the items are bought together more often than chance
//! - lift = 1: the items are independent
//! - lift < 1: the items behave as substitutes

use crate::{AggregateState, ItemId, ItemPair};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a metric cannot be computed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    /// A ratio would divide by an item count of zero
    #[error("Metric undefined: item '{item}' has not been observed")]
    DivisionUndefined {
        /// Item whose zero count is the divisor
        item: ItemId,
    },

    /// Antecedent and consequent are the same item
    #[error("Metric undefined: '{0}' cannot be paired with itself")]
    IdenticalItems(ItemId),
}

/// Derived association strength for one pair, computed on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffinityRecord {
    /// Smaller item of the canonical pair
    pub item_a: ItemId,
    /// Larger item of the canonical pair
    pub item_b: ItemId,
    /// Fraction of baskets containing both items
    pub support: f64,
    /// Estimated P(b | a)
    pub confidence_a_to_b: f64,
    /// Estimated P(a | b)
    pub confidence_b_to_a: f64,
    /// Observed co-occurrence over the co-occurrence expected under independence
    pub lift: f64,
}

impl AffinityRecord {
    /// Compare two records by canonical pair order
    pub fn cmp_pair(&self, other: &AffinityRecord) -> std::cmp::Ordering {
        (&self.item_a, &self.item_b).cmp(&(&other.item_a, &other.item_b))
    }

    /// The stronger of the two directional confidences
    pub fn max_confidence(&self) -> f64 {
        self.confidence_a_to_b.max(self.confidence_b_to_a)
    }
}

/// Ranking metric, a closed set with a fixed dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Rank by pair support
    Support,
    /// Rank by the larger directional confidence
    Confidence,
    /// Rank by lift
    #[default]
    Lift,
}

impl Metric {
    /// Every metric, in declaration order
    pub const ALL: [Metric; 3] = [Metric::Support, Metric::Confidence, Metric::Lift];

    /// Score a record under this metric
    pub fn score(&self, record: &AffinityRecord) -> f64 {
        match self {
            Metric::Support => record.support,
            Metric::Confidence => record.max_confidence(),
            Metric::Lift => record.lift,
        }
    }

    /// Get the metric name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Support => "support",
            Metric::Confidence => "confidence",
            Metric::Lift => "lift",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "support" => Ok(Metric::Support),
            "confidence" => Ok(Metric::Confidence),
            "lift" => Ok(Metric::Lift),
            _ => Err(format!("Invalid metric: {}", s)),
        }
    }
}

/// Fraction of baskets containing both items of the pair
///
/// Returns 0 for a pair that was never observed, including on an empty state.
pub fn support(state: &AggregateState, pair: &ItemPair) -> f64 {
    ratio(state.pair_count(pair), state.total_baskets())
}

/// Fraction of baskets containing the item
///
/// Returns 0 for an item that was never observed, including on an empty state.
pub fn item_support(state: &AggregateState, item: &ItemId) -> f64 {
    ratio(state.item_count(item), state.total_baskets())
}

/// Confidence of the rule `antecedent → consequent`
///
/// `pair_count(antecedent, consequent) / item_count(antecedent)`.
///
/// # Errors
///
/// [`MetricError::DivisionUndefined`] when the antecedent was never observed.
pub fn confidence(
    state: &AggregateState,
    antecedent: &ItemId,
    consequent: &ItemId,
) -> Result<f64, MetricError> {
    let pair = canonical(antecedent, consequent)?;
    let antecedent_count = nonzero(state, antecedent)?;

    Ok(state.pair_count(&pair) as f64 / antecedent_count as f64)
}

/// Lift of the rule `antecedent → consequent`
///
/// Equal to `confidence(antecedent → consequent) / support(consequent)`,
/// evaluated as `pair_count * total / (count_a * count_b)` so that
/// `lift(a → b)` and `lift(b → a)` are bit-for-bit identical.
///
/// # Errors
///
/// [`MetricError::DivisionUndefined`] when either item was never observed.
pub fn lift(
    state: &AggregateState,
    antecedent: &ItemId,
    consequent: &ItemId,
) -> Result<f64, MetricError> {
    let pair = canonical(antecedent, consequent)?;
    let antecedent_count = nonzero(state, antecedent)?;
    let consequent_count = nonzero(state, consequent)?;

    let joint = state.pair_count(&pair) as f64 * state.total_baskets() as f64;
    Ok(joint / (antecedent_count as f64 * consequent_count as f64))
}

/// Every metric for one pair
pub fn affinity_record(state: &AggregateState, pair: &ItemPair) -> Result<AffinityRecord, MetricError> {
    let (a, b) = (pair.first(), pair.second());

    Ok(AffinityRecord {
        item_a: a.clone(),
        item_b: b.clone(),
        support: support(state, pair),
        confidence_a_to_b: confidence(state, a, b)?,
        confidence_b_to_a: confidence(state, b, a)?,
        lift: lift(state, a, b)?,
    })
}

fn canonical(a: &ItemId, b: &ItemId) -> Result<ItemPair, MetricError> {
    ItemPair::new(a.clone(), b.clone()).ok_or_else(|| MetricError::IdenticalItems(a.clone()))
}

fn nonzero(state: &AggregateState, item: &ItemId) -> Result<u64, MetricError> {
    match state.item_count(item) {
        0 => Err(MetricError::DivisionUndefined { item: item.clone() }),
        count => Ok(count),
    }
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}
