//! Delimited line-item input.
//!
//! One record per row: `transaction_id<delim>item_id`, with standard CSV
//! quoting. Further columns are ignored. A first non-blank row reading
//! `transaction_id<delim>item_id` is treated as a header. Blank rows are
//! skipped; a row with an empty or absent field becomes a line item with that
//! field missing, and the extractor decides what to do with it.

use crate::error::{CliError, Result};
use basketry_extractor::LineItem;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read line items from a delimited file.
pub fn load_line_items(path: &Path, delimiter: char) -> Result<Vec<LineItem>> {
    let file = File::open(path)?;
    let records = read_line_items(file, delimiter)?;
    tracing::debug!(path = %path.display(), records = records.len(), "Read line items");
    Ok(records)
}

/// Read line items from any reader.
pub fn read_line_items<R: Read>(reader: R, delimiter: char) -> Result<Vec<LineItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut first_row = true;

    for row in reader.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }

        let transaction_id = row.get(0).filter(|f| !f.is_empty());
        let item_id = row.get(1).filter(|f| !f.is_empty());

        let header = first_row && is_header(transaction_id, item_id);
        first_row = false;
        if header {
            continue;
        }

        records.push(LineItem {
            transaction_id: transaction_id.map(str::to_string),
            item_id: item_id.map(str::to_string),
        });
    }

    Ok(records)
}

/// The csv reader splits on a single byte.
pub(crate) fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii() && *b != b'\n' && *b != b'\r' && *b != b'"')
        .ok_or_else(|| {
            CliError::Config(format!(
                "delimiter {:?} must be a single ASCII character other than a quote or line break",
                delimiter
            ))
        })
}

fn is_header(first: Option<&str>, second: Option<&str>) -> bool {
    matches!(
        (first, second),
        (Some(a), Some(b))
            if a.eq_ignore_ascii_case("transaction_id") && b.eq_ignore_ascii_case("item_id")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str, delimiter: char) -> Vec<LineItem> {
        read_line_items(text.as_bytes(), delimiter).unwrap()
    }

    #[test]
    fn test_reads_records() {
        let records = read("T1,A\nT1,B\nT2,A\n", ',');
        assert_eq!(
            records,
            vec![
                LineItem::new("T1", "A"),
                LineItem::new("T1", "B"),
                LineItem::new("T2", "A"),
            ]
        );
    }

    #[test]
    fn test_quoted_fields() {
        let records = read("\"T1\",\"Milk, 2%\"\nT1,\"Bread \"\"Rye\"\"\"\n", ',');
        assert_eq!(
            records,
            vec![
                LineItem::new("T1", "Milk, 2%"),
                LineItem::new("T1", "Bread \"Rye\""),
            ]
        );
    }

    #[test]
    fn test_skips_header_and_blank_lines() {
        let records = read("transaction_id,item_id\n\nT1,A\n  \n", ',');
        assert_eq!(records, vec![LineItem::new("T1", "A")]);
    }

    #[test]
    fn test_header_after_leading_blank_lines() {
        let records = read("\n   \ntransaction_id,item_id\nT1,A\n", ',');
        assert_eq!(records, vec![LineItem::new("T1", "A")]);
    }

    #[test]
    fn test_header_only_on_first_row() {
        let records = read("T1,A\ntransaction_id,item_id\n", ',');
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_custom_delimiter_and_extra_columns() {
        let records = read("T1;A;2.50\nT1 ; B ;1.00\n", ';');
        assert_eq!(records, vec![LineItem::new("T1", "A"), LineItem::new("T1", "B")]);
    }

    #[test]
    fn test_missing_fields_are_kept_as_missing() {
        let records = read("T1,\n,A\nT2\n", ',');
        assert_eq!(
            records,
            vec![
                LineItem {
                    transaction_id: Some("T1".to_string()),
                    item_id: None,
                },
                LineItem {
                    transaction_id: None,
                    item_id: Some("A".to_string()),
                },
                LineItem {
                    transaction_id: Some("T2".to_string()),
                    item_id: None,
                },
            ]
        );
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let result = read_line_items("T1§A".as_bytes(), '§');
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_line_items(&dir.path().join("none.csv"), ',').is_err());
    }
}
