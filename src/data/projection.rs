//! Year Projection Module
//! Turns a district record into a chronological rate series and table rows.

use crate::data::DistrictRecord;

/// School-year columns in chronological order, paired with their display labels.
pub const YEAR_COLUMNS: [(&str, &str); 6] = [
    ("20192020", "2019-2020"),
    ("20202021", "2020-2021"),
    ("20212022", "2021-2022"),
    ("20222023", "2022-2023"),
    ("20232024", "2023-2024"),
    ("20242025", "2024-2025"),
];

/// Token used in the dataset for a year with no reported rate.
const MISSING_TOKEN: &str = "NA";

/// One school year on the chart. `value` is `None` when the rate is absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearPoint {
    pub label: &'static str,
    pub value: Option<f64>,
}

/// Chronological (oldest first) rate history for a single district.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSeries {
    points: Vec<YearPoint>,
}

impl YearSeries {
    pub fn points(&self) -> &[YearPoint] {
        &self.points
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.points.iter().map(|p| p.label).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Rows for the detail table: present values only, newest first.
    pub fn table_rows(&self) -> Vec<(&'static str, f64)> {
        self.points
            .iter()
            .rev()
            .filter_map(|p| p.value.map(|v| (p.label, v)))
            .collect()
    }

    /// Most recent year that has a value.
    pub fn latest(&self) -> Option<YearPoint> {
        self.points.iter().rev().find(|p| p.value.is_some()).copied()
    }

    pub fn present_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    /// Largest present value, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.points
            .iter()
            .filter_map(|p| p.value)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

/// Parse a raw cell into a rate.
///
/// `"NA"`, blanks, unparseable text and non-finite numbers are all absent.
pub fn parse_rate(raw: Option<&str>) -> Option<f64> {
    let text = raw?.trim();
    if text.is_empty() || text == MISSING_TOKEN {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Project a record onto the fixed year columns. Never fails.
pub fn project(record: &DistrictRecord) -> YearSeries {
    let points = YEAR_COLUMNS
        .iter()
        .map(|&(code, label)| YearPoint {
            label,
            value: parse_rate(record.get(code)),
        })
        .collect();

    YearSeries { points }
}

/// Format a rate for the detail table, always with at least one decimal.
pub fn format_rate(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}%", value)
    } else {
        format!("{}%", value)
    }
}
