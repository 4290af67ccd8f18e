//! Basketry Extractor
//!
//! Turns raw line-item records into baskets.
//!
//! # Overview
//!
//! Upstream collaborators deliver one record per purchased line:
//! `{transaction_id, item_id}`. The extractor groups records by transaction,
//! collapses repeated items (a basket is a set), and yields baskets in the
//! order their transactions were first seen.
//!
//! # Architecture
//!
//! ```text
//! Line items → BasketExtractor → Baskets → AffinityCache
//! ```
//!
//! # Malformed records
//!
//! A record missing either identifier is malformed. By default it is logged
//! and skipped; [`MalformedPolicy::Abort`] stops extraction at the first one.
//!
//! # Example Usage
//!
//! ```
//! use basketry_extractor::{extract_baskets, ExtractorConfig, LineItem};
//!
//! let records = vec![
//!     LineItem::new("T1", "P001"),
//!     LineItem::new("T1", "P002"),
//!     LineItem { transaction_id: None, item_id: Some("P003".into()) },
//! ];
//!
//! let baskets = extract_baskets(records, ExtractorConfig::default()).unwrap();
//! assert_eq!(baskets.len(), 1);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod record;


pub use config::{ExtractorConfig, Grouping, MalformedPolicy};
pub use error::{ExtractorError, MissingField};
pub use extractor::{extract_baskets, BasketExtractor};
pub use record::LineItem;
