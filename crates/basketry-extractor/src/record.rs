//! Raw line-item records as delivered by upstream collaborators

use crate::MissingField;
use basketry_domain::{ItemId, TransactionId};
use serde::{Deserialize, Serialize};

/// One purchased line of a transaction
///
/// Both fields are optional because upstream data may be incomplete. A field
/// that is absent, empty or only whitespace counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Transaction the line belongs to
    #[serde(default)]
    pub transaction_id: Option<String>,

    /// Product bought on this line
    #[serde(default)]
    pub item_id: Option<String>,
}

impl LineItem {
    /// Create a complete line item
    pub fn new(transaction_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            transaction_id: Some(transaction_id.into()),
            item_id: Some(item_id.into()),
        }
    }

    /// Check both identifiers and return them trimmed
    pub(crate) fn identifiers(&self) -> Result<(TransactionId, ItemId), MissingField> {
        match (present(&self.transaction_id), present(&self.item_id)) {
            (Some(txn), Some(item)) => Ok((TransactionId::new(txn), ItemId::new(item))),
            (None, Some(_)) => Err(MissingField::TransactionId),
            (Some(_), None) => Err(MissingField::ItemId),
            (None, None) => Err(MissingField::Both),
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_record() {
        let (txn, item) = LineItem::new(" T1 ", "P001").identifiers().unwrap();
        assert_eq!(txn.as_str(), "T1");
        assert_eq!(item.as_str(), "P001");
    }

    #[test]
    fn test_missing_fields() {
        let no_txn = LineItem {
            transaction_id: None,
            item_id: Some("P001".to_string()),
        };
        let blank_item = LineItem {
            transaction_id: Some("T1".to_string()),
            item_id: Some("   ".to_string()),
        };

        assert_eq!(no_txn.identifiers(), Err(MissingField::TransactionId));
        assert_eq!(blank_item.identifiers(), Err(MissingField::ItemId));
        assert_eq!(LineItem::default().identifiers(), Err(MissingField::Both));
    }

    #[test]
    fn test_deserialize_with_absent_field() {
        let item: LineItem = serde_json::from_str(r#"{"transaction_id": "T1"}"#).unwrap();
        assert_eq!(item.identifiers(), Err(MissingField::ItemId));
    }
}
