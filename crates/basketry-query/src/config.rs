//! Query configuration

use crate::QueryError;
use basketry_domain::Metric;
use serde::{Deserialize, Serialize};

/// Ranking and filtering parameters for affinity queries
///
/// # Examples
///
/// ```
/// use basketry_domain::Metric;
/// use basketry_query::AffinityQuery;
///
/// let query = AffinityQuery::from_toml(
///     r#"
///     metric = "support"
///     min_support = 0.05
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(query.metric, Metric::Support);
/// assert_eq!(query.top_n, 10);
/// assert!(query.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffinityQuery {
    /// Metric to rank by
    pub metric: Metric,

    /// Pairs with lower support are discarded (0.0-1.0)
    pub min_support: f64,

    /// Pairs whose stronger directional confidence is lower are discarded (0.0-1.0)
    pub min_confidence: f64,

    /// Maximum number of results
    pub top_n: usize,
}

impl Default for AffinityQuery {
    fn default() -> Self {
        Self {
            metric: Metric::Lift,
            min_support: 0.01,
            min_confidence: 0.1,
            top_n: 10,
        }
    }
}

impl AffinityQuery {
    /// Strict preset: only well-supported, confident pairs
    pub fn strict() -> Self {
        Self {
            metric: Metric::Lift,
            min_support: 0.05,
            min_confidence: 0.5,
            top_n: 10,
        }
    }

    /// Permissive preset: every observed pair qualifies
    pub fn permissive() -> Self {
        Self {
            metric: Metric::Lift,
            min_support: 0.0,
            min_confidence: 0.0,
            top_n: 100,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), QueryError> {
        check_fraction("min_support", self.min_support)?;
        check_fraction("min_confidence", self.min_confidence)?;
        if self.top_n == 0 {
            return Err(QueryError::InvalidQuery(
                "top_n must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, QueryError> {
        toml::from_str(toml_str)
            .map_err(|e| QueryError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, QueryError> {
        toml::to_string_pretty(self)
            .map_err(|e| QueryError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

fn check_fraction(name: &str, value: f64) -> Result<(), QueryError> {
    // Written so that NaN fails too
    if !(0.0..=1.0).contains(&value) {
        return Err(QueryError::InvalidQuery(format!(
            "{} {} out of range [0.0, 1.0]",
            name, value
        )));
    }
    Ok(())
}
