//! Data module - CSV loading, search and year projection

mod dataset;
mod loader;
mod projection;
mod search;

pub use dataset::{Dataset, DistrictRecord};
pub(crate) use dataset::NAME_COLUMN;
pub use loader::{DataSource, DistrictLoader, LoadError};
pub use projection::{format_rate, parse_rate, project, YearPoint, YearSeries, YEAR_COLUMNS};
pub use search::{search, SearchOutcome, DEFAULT_MIN_QUERY_CHARS};
