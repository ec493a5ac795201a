// src/enrich/dataset.rs
// =============================================================================
// A CSV company dataset held in memory.
//
// Columns the enrichment does not know about are kept untouched, in their
// original order. Writing to a column that does not exist appends it to the
// header and pads every row.
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn read(path: &Path) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_reader(reader).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let mut row: Vec<String> = record?.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    // Cell value; an unknown column reads as empty
    pub fn get(&self, row: usize, column: &str) -> &str {
        self.column_index(column)
            .and_then(|i| self.rows.get(row).map(|r| r[i].as_str()))
            .unwrap_or("")
    }

    pub fn set(&mut self, row: usize, column: &str, value: impl Into<String>) {
        let index = match self.column_index(column) {
            Some(index) => index,
            None => {
                self.headers.push(column.to_string());
                for r in &mut self.rows {
                    r.push(String::new());
                }
                self.headers.len() - 1
            }
        };

        if let Some(r) = self.rows.get_mut(row) {
            r[index] = value.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> Dataset {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_bytes());
        Dataset::from_reader(reader).unwrap()
    }

    #[test]
    fn test_reads_and_pads_rows() {
        let data = parse("initial_company_name,revenue_2023_usd,notes\nAcme,12 M,keep\nGlobex\n");
        assert_eq!(data.len(), 2);
        assert_eq!(data.get(0, "notes"), "keep");
        assert_eq!(data.get(1, "revenue_2023_usd"), "");
        assert_eq!(data.get(0, "no_such_column"), "");
        assert_eq!(data.get(9, "notes"), "");
    }

    #[test]
    fn test_set_appends_new_column() {
        let mut data = parse("initial_company_name\nAcme\nGlobex\n");
        data.set(1, "parent_company", "Globex Corp");

        assert!(data.has_column("parent_company"));
        assert_eq!(data.get(0, "parent_company"), "");
        assert_eq!(data.get(1, "parent_company"), "Globex Corp");
    }

    #[test]
    fn test_write_round_trips_untouched_columns() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        std::fs::write(&input, "initial_company_name,notes\n\"Acme, Inc.\",x\n").unwrap();

        let mut data = Dataset::read(&input).unwrap();
        data.set(0, "revenue_2023_usd", "5 M");
        let output = dir.path().join("out.csv");
        data.write(&output).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "initial_company_name,notes,revenue_2023_usd\n\"Acme, Inc.\",x,5 M\n"
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Dataset::read(Path::new("/definitely/not/here.csv")).is_err());
    }
}
