//! CSV Data Loader Module
//! Fetches the district CSV and parses it into records using Polars.

use crate::data::{Dataset, DistrictRecord, NAME_COLUMN, YEAR_COLUMNS};
use polars::prelude::*;
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to fetch data: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing 'clean_name' column (found: {found:?})")]
    SchemaMismatch { found: Vec<String> },
    #[error("No data found in CSV file")]
    EmptyDataset,
}

impl LoadError {
    /// Status line text shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::Io(_) | LoadError::Fetch(_) => {
                "Error loading data file. Please check connection."
            }
            LoadError::SchemaMismatch { .. } => {
                "Error: Data format incorrect (missing clean_name column)."
            }
            LoadError::Csv(_) | LoadError::EmptyDataset => "Error: No data found in CSV file.",
        }
    }
}

/// Where the CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` strings are URLs, anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Strip a byte-order mark and surrounding whitespace from a header.
fn normalize_header(raw: &str) -> String {
    raw.trim().trim_start_matches('\u{feff}').trim().to_string()
}

/// Loads district records from a [`DataSource`].
pub struct DistrictLoader;

impl DistrictLoader {
    /// Fetch and parse the whole dataset.
    pub fn load(source: &DataSource) -> Result<Dataset, LoadError> {
        info!("Loading district data from {}", source);
        let bytes = Self::fetch(source)?;
        let records = Self::parse_records(bytes)?;
        info!("Loaded {} districts from {}", records.len(), source);
        Ok(Dataset::new(records, source.to_string()))
    }

    /// Read the raw bytes of the resource.
    pub fn fetch(source: &DataSource) -> Result<Vec<u8>, LoadError> {
        match source {
            DataSource::File(path) => Ok(std::fs::read(path)?),
            DataSource::Url(url) => {
                let response = reqwest::blocking::get(url)?.error_for_status()?;
                Ok(response.bytes()?.to_vec())
            }
        }
    }

    /// Parse CSV bytes into records, normalizing the name column header.
    pub fn parse_records(bytes: Vec<u8>) -> Result<Vec<DistrictRecord>, LoadError> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(LoadError::EmptyDataset);
        }

        // Every column is read as text; numeric parsing happens at projection time
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(CsvParseOptions::default().with_truncate_ragged_lines(true))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        let raw_headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        debug!("Raw CSV headers: {:?}", raw_headers);

        if df.height() == 0 {
            return Err(LoadError::EmptyDataset);
        }

        let headers: Vec<String> = raw_headers.iter().map(|h| normalize_header(h)).collect();
        let name_idx = headers
            .iter()
            .position(|h| h == NAME_COLUMN)
            .ok_or_else(|| LoadError::SchemaMismatch {
                found: raw_headers.clone(),
            })?;

        let missing_years: Vec<&str> = YEAR_COLUMNS
            .iter()
            .map(|(code, _)| *code)
            .filter(|code| !headers.iter().any(|h| h == code))
            .collect();
        if !missing_years.is_empty() {
            warn!("Year columns missing from data: {:?}", missing_years);
        }

        let columns = df.get_columns();
        let text_columns = columns
            .iter()
            .map(|col| col.str())
            .collect::<PolarsResult<Vec<_>>>()?;
        let names = text_columns[name_idx];

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = 0usize;

        for row in 0..df.height() {
            let Some(name) = names.get(row).filter(|n| !n.trim().is_empty()) else {
                skipped += 1;
                continue;
            };

            let cells = headers
                .iter()
                .zip(text_columns.iter())
                .enumerate()
                .filter(|(i, _)| *i != name_idx)
                .filter_map(|(_, (header, values))| {
                    values.get(row).map(|v| (header.clone(), v.to_string()))
                });

            records.push(DistrictRecord::new(name, cells));
        }

        if skipped > 0 {
            warn!("Skipped {} rows with an empty district name", skipped);
        }

        if records.is_empty() {
            return Err(LoadError::EmptyDataset);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "clean_name,20192020,20202021,20212022,20222023,20232024,20242025";

    fn parse(text: &str) -> Result<Vec<DistrictRecord>, LoadError> {
        DistrictLoader::parse_records(text.as_bytes().to_vec())
    }

    #[test]
    fn parses_rows_as_text_in_file_order() {
        let csv = format!(
            "{HEADER}\nAlbany City,30.1,NA,,28,27.5,25\nBuffalo City,40,41,NA,39.2,38,37\n"
        );
        let records = parse(&csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].clean_name(), "Albany City");
        assert_eq!(records[0].get("20192020"), Some("30.1"));
        assert_eq!(records[0].get("20202021"), Some("NA"));
        assert_eq!(records[0].get("20242025"), Some("25"));
        assert_eq!(records[1].clean_name(), "Buffalo City");
    }

    #[test]
    fn bom_and_whitespace_on_name_header_are_normalized() {
        let records = parse("\u{feff} clean_name ,20192020\nUtica City,12.5\n").unwrap();
        assert_eq!(records[0].clean_name(), "Utica City");
        assert_eq!(records[0].get("20192020"), Some("12.5"));
    }

    #[test]
    fn missing_name_column_is_schema_mismatch() {
        let err = parse("district,20192020\nAlbany,3\n").unwrap_err();
        match err {
            LoadError::SchemaMismatch { found } => {
                assert_eq!(found, vec!["district".to_string(), "20192020".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_and_header_only_inputs_are_empty_dataset() {
        assert!(matches!(parse(""), Err(LoadError::EmptyDataset)));
        assert!(matches!(parse(" \n\n"), Err(LoadError::EmptyDataset)));
        assert!(matches!(
            parse(&format!("{HEADER}\n")),
            Err(LoadError::EmptyDataset)
        ));
    }

    #[test]
    fn header_only_without_name_column_is_empty_dataset() {
        assert!(matches!(
            parse("district,20192020\n"),
            Err(LoadError::EmptyDataset)
        ));
    }

    #[test]
    fn ragged_row_does_not_drop_the_dataset() {
        let csv = format!("{HEADER}\nAlbany City,1,2,3,4,5,6,\nRome City,1,2,3,4,5,6\n");
        let records = parse(&csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].clean_name(), "Albany City");
        assert_eq!(records[0].get("20242025"), Some("6"));
        assert_eq!(records[1].clean_name(), "Rome City");
    }

    #[test]
    fn nameless_rows_are_skipped() {
        let csv = format!("{HEADER}\n,1,2,3,4,5,6\nRome City,1,2,3,4,5,6\n");
        let records = parse(&csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].clean_name(), "Rome City");
    }

    #[test]
    fn data_source_parsing() {
        assert_eq!(
            DataSource::parse("https://example.org/district_data.csv"),
            DataSource::Url("https://example.org/district_data.csv".into())
        );
        assert_eq!(
            DataSource::parse("district_data.csv"),
            DataSource::File(PathBuf::from("district_data.csv"))
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DistrictLoader::load(&DataSource::parse("/nonexistent/district_data.csv"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert_eq!(
            err.user_message(),
            "Error loading data file. Please check connection."
        );
    }

    #[test]
    fn normalize_header_variants() {
        assert_eq!(normalize_header("\u{feff}clean_name"), "clean_name");
        assert_eq!(normalize_header("  clean_name\t"), "clean_name");
        assert_eq!(normalize_header("20192020"), "20192020");
    }
}
