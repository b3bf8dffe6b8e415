//! District Search Module
//! Case-insensitive substring search over district names.

use crate::data::DistrictRecord;

/// Queries shorter than this (after trimming) do not trigger a search.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

/// Result of running a query against the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// Query too short; the results list stays hidden.
    #[default]
    Hidden,
    /// Query ran and nothing matched.
    NoMatches,
    /// Indices of matching records, in dataset order.
    Matches(Vec<usize>),
}

impl SearchOutcome {
    pub fn is_hidden(&self) -> bool {
        matches!(self, SearchOutcome::Hidden)
    }

    pub fn matches(&self) -> &[usize] {
        match self {
            SearchOutcome::Matches(indices) => indices,
            _ => &[],
        }
    }
}

/// Search `records` for names containing `query`, ignoring case.
pub fn search(records: &[DistrictRecord], query: &str, min_chars: usize) -> SearchOutcome {
    let needle = query.trim().to_lowercase();
    if needle.chars().count() < min_chars {
        return SearchOutcome::Hidden;
    }

    let indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.clean_name().to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect();

    if indices.is_empty() {
        SearchOutcome::NoMatches
    } else {
        SearchOutcome::Matches(indices)
    }
}
