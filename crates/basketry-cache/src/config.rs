//! Configuration for the affinity cache
//!
//! The source data never says what a transaction with no items means, so the
//! cache makes it an explicit policy.

use crate::CacheError;
use serde::{Deserialize, Serialize};

/// Treatment of a basket with no items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyBasketPolicy {
    /// No-op: the basket total does not move
    #[default]
    Skip,
    /// Count the basket toward the total without touching item or pair counts
    Count,
    /// Fail with [`CacheError::EmptyBasket`]
    Reject,
}

/// Configuration for the affinity cache
///
/// # Examples
///
/// ```
/// use basketry_cache::{CacheConfig, EmptyBasketPolicy};
///
/// let config = CacheConfig::from_toml("empty_basket_policy = \"count\"").unwrap();
/// assert_eq!(config.empty_basket_policy, EmptyBasketPolicy::Count);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// What an empty basket does to the counts
    #[serde(default)]
    pub empty_basket_policy: EmptyBasketPolicy,
}

impl CacheConfig {
    /// Strict preset: empty baskets are errors
    pub fn strict() -> Self {
        Self {
            empty_basket_policy: EmptyBasketPolicy::Reject,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, CacheError> {
        toml::from_str(toml_str)
            .map_err(|e| CacheError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, CacheError> {
        toml::to_string_pretty(self)
            .map_err(|e| CacheError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(CacheConfig::default().empty_basket_policy, EmptyBasketPolicy::Skip);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CacheConfig::strict();
        let parsed = CacheConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(CacheConfig::from_toml("").unwrap(), CacheConfig::default());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = CacheConfig {
            empty_basket_policy: EmptyBasketPolicy::Count,
        };
        let serialized = serde_json::to_string(&config).unwrap();
        assert!(serialized.contains("\"count\""));

        let deserialized: CacheConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }
}
