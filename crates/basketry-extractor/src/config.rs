//! Configuration for the Extractor

use crate::ExtractorError;
use serde::{Deserialize, Serialize};

/// What to do with a line item that lacks an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Log the record, count it, and keep going
    #[default]
    Skip,
    /// Yield an error and stop extracting
    Abort,
}

/// How line items are grouped into baskets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// Merge every record sharing a transaction id, wherever it appears
    ///
    /// Baskets come out in first-seen order, but the whole input is read
    /// before the first basket is yielded.
    #[default]
    ByTransaction,
    /// Close the current basket whenever the transaction id changes
    ///
    /// Fully lazy. Suited to streams that deliver each transaction's lines
    /// together; a transaction id that reappears later opens a new basket.
    Contiguous,
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Handling of records missing an identifier
    #[serde(default)]
    pub malformed_policy: MalformedPolicy,

    /// Grouping strategy
    #[serde(default)]
    pub grouping: Grouping,
}

impl ExtractorConfig {
    /// Streaming preset: contiguous grouping, malformed records skipped
    pub fn streaming() -> Self {
        Self {
            malformed_policy: MalformedPolicy::Skip,
            grouping: Grouping::Contiguous,
        }
    }

    /// Strict preset: the first malformed record aborts extraction
    pub fn strict() -> Self {
        Self {
            malformed_policy: MalformedPolicy::Abort,
            grouping: Grouping::ByTransaction,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.malformed_policy, MalformedPolicy::Skip);
        assert_eq!(config.grouping, Grouping::ByTransaction);
    }

    #[test]
    fn test_presets() {
        assert_eq!(ExtractorConfig::streaming().grouping, Grouping::Contiguous);
        assert_eq!(ExtractorConfig::strict().malformed_policy, MalformedPolicy::Abort);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("grouping = \"contiguous\"").unwrap();

        assert_eq!(parsed.grouping, Grouping::Contiguous);
        assert_eq!(parsed.malformed_policy, MalformedPolicy::Skip);
    }

    #[test]
    fn test_invalid_toml() {
        let result = ExtractorConfig::from_toml("malformed_policy = \"retry\"");
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }
}
