//! Lookup Session
//! All mutable state of one lookup window, with one handler per UI event.

use crate::charts::{ChartSlot, RateChart};
use crate::data::{project, search, Dataset, DistrictRecord, LoadError, SearchOutcome};
use tracing::{debug, error, info};

/// Progress of the one data load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    /// Inline status text. Empty once data is ready.
    pub fn message(&self) -> &str {
        match self {
            LoadStatus::Loading => "Loading data...",
            LoadStatus::Ready => "",
            LoadStatus::Failed(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadStatus::Failed(_))
    }
}

pub struct Session {
    dataset: Dataset,
    min_query_chars: usize,
    query: String,
    outcome: SearchOutcome,
    results_open: bool,
    selected: Option<usize>,
    charts: ChartSlot,
    status: LoadStatus,
}

impl Session {
    pub fn new(min_query_chars: usize) -> Self {
        Self {
            dataset: Dataset::empty(),
            min_query_chars,
            query: String::new(),
            outcome: SearchOutcome::Hidden,
            results_open: false,
            selected: None,
            charts: ChartSlot::new(),
            status: LoadStatus::Loading,
        }
    }

    pub fn on_load_complete(&mut self, dataset: Dataset) {
        info!(
            "Dataset ready: {} districts from {}",
            dataset.len(),
            dataset.source()
        );
        self.dataset = dataset;
        self.status = LoadStatus::Ready;
        // Re-run whatever was typed while loading
        let query = std::mem::take(&mut self.query);
        self.on_query_changed(&query);
    }

    pub fn on_load_failed(&mut self, err: &LoadError) {
        error!("Data load failed: {}", err);
        self.dataset = Dataset::empty();
        self.status = LoadStatus::Failed(err.user_message().to_string());
    }

    pub fn on_query_changed(&mut self, query: &str) {
        self.query = query.to_string();
        self.outcome = search(self.dataset.records(), query, self.min_query_chars);
        self.results_open = !self.outcome.is_hidden();
    }

    /// Select the record at `index` from the current results.
    pub fn on_result_chosen(&mut self, index: usize) {
        let Some(record) = self.dataset.get(index) else {
            return;
        };
        debug!("Selected district {}", record.clean_name());

        let series = project(record);
        self.charts.replace(series, record.clean_name());
        self.selected = Some(index);

        self.results_open = false;
        self.query.clear();
        self.outcome = SearchOutcome::Hidden;
    }

    pub fn on_click_outside(&mut self) {
        self.results_open = false;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    /// Whether the results list (matches or the no-match notice) is shown.
    pub fn results_visible(&self) -> bool {
        self.results_open
    }

    /// Names of the records in the current result list, with their indices.
    pub fn result_names(&self) -> Vec<(usize, &str)> {
        self.outcome
            .matches()
            .iter()
            .filter_map(|&i| self.dataset.get(i).map(|r| (i, r.clean_name())))
            .collect()
    }

    pub fn selected(&self) -> Option<&DistrictRecord> {
        self.selected.and_then(|i| self.dataset.get(i))
    }

    pub fn chart(&self) -> Option<&RateChart> {
        self.charts.current()
    }

    pub fn live_charts(&self) -> usize {
        self.charts.live_charts()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }
}
