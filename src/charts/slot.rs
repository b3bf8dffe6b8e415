//! Chart Slot
//! Owns the single live chart instance and disposes it on replacement.

use crate::charts::RateChart;
use crate::data::YearSeries;
use std::rc::Rc;
use tracing::debug;

/// Holds at most one [`RateChart`].
#[derive(Default)]
pub struct ChartSlot {
    current: Option<RateChart>,
    next_id: u64,
    live: Rc<()>,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispose of the current chart, then build a new one over `series`.
    pub fn replace(&mut self, series: YearSeries, title: &str) -> &RateChart {
        if let Some(previous) = self.current.take() {
            debug!("Disposing chart #{} ({})", previous.id(), previous.title());
            drop(previous);
        }

        self.next_id += 1;
        let chart = RateChart::new(self.next_id, title, series, Rc::clone(&self.live));
        self.current.insert(chart)
    }

    pub fn current(&self) -> Option<&RateChart> {
        self.current.as_ref()
    }

    /// Number of chart instances built by this slot that still exist.
    pub fn live_charts(&self) -> usize {
        Rc::strong_count(&self.live) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{project, DistrictRecord};

    fn series_for(name: &str, rate: &str) -> YearSeries {
        project(&DistrictRecord::new(
            name,
            vec![("20192020".to_string(), rate.to_string())],
        ))
    }

    #[test]
    fn starts_empty() {
        let slot = ChartSlot::new();
        assert!(slot.current().is_none());
        assert_eq!(slot.live_charts(), 0);
    }

    #[test]
    fn reselecting_keeps_exactly_one_chart() {
        let mut slot = ChartSlot::new();

        let first_id = slot.replace(series_for("Albany", "5"), "Albany").id();
        assert_eq!(slot.live_charts(), 1);

        let second_id = slot.replace(series_for("Buffalo", "7"), "Buffalo").id();
        assert_eq!(slot.live_charts(), 1);
        assert_ne!(first_id, second_id);

        let current = slot.current().unwrap();
        assert_eq!(current.title(), "Buffalo");
        assert_eq!(current.series().values()[0], Some(7.0));
    }

    #[test]
    fn reselecting_same_district_builds_fresh_instance() {
        let mut slot = ChartSlot::new();
        let a = slot.replace(series_for("Rome", "3"), "Rome").id();
        let b = slot.replace(series_for("Rome", "3"), "Rome").id();
        assert_ne!(a, b);
        assert_eq!(slot.live_charts(), 1);
    }
}
