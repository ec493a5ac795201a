// src/output/table.rs
// Writes scrape results as CSV with an explicit header row.
//
// The header is written even when there are no rows, so an empty run still
// leaves a well-formed file behind.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

pub fn write_csv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ListingCard;

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.csv");
        let cards = vec![ListingCard {
            company_name: "Acme, Inc.".into(),
            description: "Planning".into(),
            page_number: 2,
        }];

        write_csv(&path, &["company_name", "description", "page_number"], &cards).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "company_name,description,page_number\n\"Acme, Inc.\",Planning,2\n"
        );
    }

    #[test]
    fn test_empty_rows_still_write_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_csv::<ListingCard>(&path, &["a", "b"], &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n");
    }
}
