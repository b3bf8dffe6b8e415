//! District Dataset Module
//! In-memory district records, held in file order.

use std::collections::HashMap;

/// Canonical name of the district-name column.
pub const NAME_COLUMN: &str = "clean_name";

/// One row of the dataset.
///
/// `clean_name` is never empty. Every other non-missing cell is kept by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictRecord {
    clean_name: String,
    cells: HashMap<String, String>,
}

impl DistrictRecord {
    pub fn new<I>(clean_name: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            clean_name: clean_name.into(),
            cells: cells.into_iter().collect(),
        }
    }

    pub fn clean_name(&self) -> &str {
        &self.clean_name
    }

    /// Raw cell value for a column. `None` when the column or cell is missing.
    pub fn get(&self, column: &str) -> Option<&str> {
        if column == NAME_COLUMN {
            return Some(&self.clean_name);
        }
        self.cells.get(column).map(String::as_str)
    }
}

/// All records loaded from one data source.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<DistrictRecord>,
    source: String,
}

impl Dataset {
    pub fn new(records: Vec<DistrictRecord>, source: impl Into<String>) -> Self {
        Self {
            records,
            source: source.into(),
        }
    }

    /// Empty dataset used before a load completes or after it fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DistrictRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&DistrictRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Description of where the records came from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_column_reads_through_get() {
        let rec = DistrictRecord::new(
            "Lakeview",
            vec![("20192020".to_string(), "4.5".to_string())],
        );
        assert_eq!(rec.get(NAME_COLUMN), Some("Lakeview"));
        assert_eq!(rec.get("20192020"), Some("4.5"));
        assert_eq!(rec.get("20202021"), None);
    }

    #[test]
    fn empty_dataset_has_no_records() {
        let ds = Dataset::empty();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
        assert!(ds.get(0).is_none());
    }
}
