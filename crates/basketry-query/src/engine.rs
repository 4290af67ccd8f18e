//! Ranking and recommendation over aggregate snapshots

use crate::{AffinityQuery, QueryError, Recommendation};
use basketry_domain::metrics::{affinity_record, confidence};
use basketry_domain::{AffinityRecord, AggregateState, ItemId, Metric};
use std::cmp::Ordering;

/// Read-only query engine
///
/// Holds a validated [`AffinityQuery`] and evaluates it against any
/// [`AggregateState`], typically a cache snapshot. Every call costs
/// O(distinct observed pairs); nothing is cached between calls.
///
/// # Examples
///
/// ```
/// use basketry_domain::{AggregateState, Basket};
/// use basketry_query::{AffinityQuery, AffinityQueryEngine};
///
/// let state = AggregateState::from_baskets(&[
///     Basket::new("T1", ["A", "B"]),
///     Basket::new("T2", ["A", "B"]),
///     Basket::new("T3", ["A", "C"]),
/// ])
/// .unwrap();
///
/// let engine = AffinityQueryEngine::new(AffinityQuery::default()).unwrap();
/// let top = engine.top_affinities(&state).unwrap();
///
/// assert_eq!(top.len(), 2);
/// assert_eq!(top[0].item_b.as_str(), "B");
/// ```
#[derive(Debug, Clone)]
pub struct AffinityQueryEngine {
    query: AffinityQuery,
}

impl AffinityQueryEngine {
    /// Create an engine for a query
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidQuery`] when the query fails validation.
    pub fn new(query: AffinityQuery) -> Result<Self, QueryError> {
        query.validate()?;
        Ok(Self { query })
    }

    /// The query this engine evaluates
    pub fn query(&self) -> &AffinityQuery {
        &self.query
    }

    /// Every pair passing the thresholds, in canonical pair order
    pub fn affinities(&self, state: &AggregateState) -> Result<Vec<AffinityRecord>, QueryError> {
        qualifying(state, &self.query)
    }

    /// Pairs passing the thresholds, ranked by the query metric
    pub fn top_affinities(&self, state: &AggregateState) -> Result<Vec<AffinityRecord>, QueryError> {
        top_affinities(state, &self.query)
    }

    /// Items most associated with `item`, ranked by lift
    pub fn recommendations_for(
        &self,
        state: &AggregateState,
        item: &ItemId,
        top_n: usize,
    ) -> Result<Vec<Recommendation>, QueryError> {
        recommendations_for(state, item, top_n)
    }
}

impl Default for AffinityQueryEngine {
    fn default() -> Self {
        Self {
            query: AffinityQuery::default(),
        }
    }
}

/// Rank qualifying pairs of a snapshot under `query`
///
/// Pairs with support below `min_support`, or whose stronger directional
/// confidence is below `min_confidence`, are discarded. The rest are sorted
/// by the query metric descending, then support descending, then canonical
/// pair order, and truncated to `top_n`. An empty state yields an empty list.
pub fn top_affinities(
    state: &AggregateState,
    query: &AffinityQuery,
) -> Result<Vec<AffinityRecord>, QueryError> {
    query.validate()?;

    let mut records = qualifying(state, query)?;
    records.sort_by(|a, b| rank(query.metric, a, b));
    records.truncate(query.top_n);

    tracing::debug!(
        metric = %query.metric,
        results = records.len(),
        pairs = state.distinct_pairs(),
        "Ranked affinities"
    );
    Ok(records)
}

/// Counterparts of `item`, ranked by lift with the same tie-breaks
///
/// Thresholds do not apply here: every observed counterpart is a candidate.
///
/// # Errors
///
/// [`QueryError::UnknownItem`] when `item` has never been observed.
pub fn recommendations_for(
    state: &AggregateState,
    item: &ItemId,
    top_n: usize,
) -> Result<Vec<Recommendation>, QueryError> {
    if top_n == 0 {
        return Err(QueryError::InvalidQuery(
            "top_n must be greater than 0".to_string(),
        ));
    }
    if state.item_count(item) == 0 {
        return Err(QueryError::UnknownItem(item.clone()));
    }

    let mut ranked = Vec::new();
    for (pair, _) in state.pairs() {
        let Some(other) = pair.counterpart(item) else {
            continue;
        };
        ranked.push((affinity_record(state, pair)?, other.clone()));
    }

    ranked.sort_by(|(a, _), (b, _)| rank(Metric::Lift, a, b));
    ranked.truncate(top_n);

    let recommendations = ranked
        .into_iter()
        .map(|(record, other)| {
            Ok(Recommendation {
                confidence: confidence(state, item, &other)?,
                reverse_confidence: confidence(state, &other, item)?,
                support: record.support,
                lift: record.lift,
                item: other,
            })
        })
        .collect::<Result<Vec<_>, QueryError>>()?;

    tracing::debug!(item = %item, results = recommendations.len(), "Computed recommendations");
    Ok(recommendations)
}

fn qualifying(
    state: &AggregateState,
    query: &AffinityQuery,
) -> Result<Vec<AffinityRecord>, QueryError> {
    let mut records = Vec::new();
    for (pair, _) in state.pairs() {
        let record = affinity_record(state, pair)?;
        if record.support < query.min_support || record.max_confidence() < query.min_confidence {
            continue;
        }
        records.push(record);
    }

    records.sort_by(AffinityRecord::cmp_pair);
    Ok(records)
}

/// Descending score, then descending support, then ascending pair
fn rank(metric: Metric, a: &AffinityRecord, b: &AffinityRecord) -> Ordering {
    metric
        .score(b)
        .total_cmp(&metric.score(a))
        .then_with(|| b.support.total_cmp(&a.support))
        .then_with(|| a.cmp_pair(b))
}
