//! Configuration management for the CLI.
//!
//! One TOML file carries every section; each is optional.
//!
//! ```toml
//! [settings]
//! color = true
//! format = "table"
//!
//! [input]
//! delimiter = ","
//!
//! [extractor]
//! malformed_policy = "skip"
//! grouping = "by_transaction"
//!
//! [cache]
//! empty_basket_policy = "skip"
//!
//! [query]
//! metric = "lift"
//! min_support = 0.01
//! min_confidence = 0.1
//! top_n = 10
//! ```

use crate::error::{CliError, Result};
use basketry_cache::CacheConfig;
use basketry_extractor::ExtractorConfig;
use basketry_query::AffinityQuery;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Input file settings
    #[serde(default)]
    pub input: InputSettings,

    /// Basket extraction
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Co-occurrence cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Default affinity query
    #[serde(default)]
    pub query: AffinityQuery,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Input file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSettings {
    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Load configuration from a file, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path)?;
                let config = Self::from_toml(&contents)?;
                tracing::debug!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.query.validate()?;
        crate::input::delimiter_byte(self.input.delimiter)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_delimiter() -> char {
    ','
}

#[cfg(test)]
mod tests {
    use super::*;
    use basketry_cache::EmptyBasketPolicy;
    use basketry_domain::Metric;
    use basketry_extractor::Grouping;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.input.delimiter, ',');
        assert_eq!(config.query, AffinityQuery::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.query.top_n, 10);
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_sections_parse() {
        let config = Config::from_toml(
            r#"
            [input]
            delimiter = ";"

            [extractor]
            grouping = "contiguous"

            [cache]
            empty_basket_policy = "count"

            [query]
            metric = "confidence"
            top_n = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.input.delimiter, ';');
        assert_eq!(config.extractor.grouping, Grouping::Contiguous);
        assert_eq!(config.cache.empty_basket_policy, EmptyBasketPolicy::Count);
        assert_eq!(config.query.metric, Metric::Confidence);
        assert_eq!(config.query.top_n, 3);
        assert_eq!(config.query.min_support, 0.01);
    }

    #[test]
    fn test_invalid_query_section_rejected() {
        let result = Config::from_toml("[query]\nmin_support = 2.0");
        assert!(matches!(result, Err(CliError::Query(_))));
    }

    #[test]
    fn test_invalid_delimiter_rejected() {
        for delimiter in ["\\n", "\\\"", "§"] {
            let toml = format!("[input]\ndelimiter = \"{}\"", delimiter);
            let result = Config::from_toml(&toml);
            assert!(matches!(result, Err(CliError::Config(_))), "accepted {:?}", delimiter);
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\nformat = \"json\"\ncolor = false").unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(!config.settings.color);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.query, config.query);
        assert_eq!(parsed.input.delimiter, config.input.delimiter);
    }
}
