//! Chart Plotter Module
//! Builds the absenteeism line chart and detail table using egui_plot.

use crate::data::{format_rate, YearSeries};
use egui::{Color32, RichText};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints, Points};
use std::rc::Rc;

/// Line and marker color
pub const PRIMARY_COLOR: Color32 = Color32::from_rgb(37, 99, 235);

pub const SERIES_NAME: &str = "Chronic Absenteeism Rate (%)";
pub const Y_AXIS_TITLE: &str = "Percent (%)";

/// One constructed chart over a district's year series.
///
/// Instances are created by [`crate::charts::ChartSlot`], which keeps at most one alive.
pub struct RateChart {
    id: u64,
    title: String,
    series: YearSeries,
    segments: Vec<Vec<[f64; 2]>>,
    _live: Rc<()>,
}

impl RateChart {
    pub(crate) fn new(id: u64, title: &str, series: YearSeries, live: Rc<()>) -> Self {
        let segments = line_segments(&series);
        Self {
            id,
            title: title.to_string(),
            series,
            segments,
            _live: live,
        }
    }

    /// Unique per instance; used as the plot id so no view state carries over.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn series(&self) -> &YearSeries {
        &self.series
    }

    /// Runs of consecutive present points. Absent years break the line.
    pub fn segments(&self) -> &[Vec<[f64; 2]>] {
        &self.segments
    }

    /// Every present point as `[x, y]`, x being the year index.
    pub fn markers(&self) -> Vec<[f64; 2]> {
        self.segments.iter().flatten().copied().collect()
    }
}

/// Split a series into runs of present values, x = position in the series.
pub fn line_segments(series: &YearSeries) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();

    for (i, point) in series.points().iter().enumerate() {
        match point.value {
            Some(v) => current.push([i as f64, v]),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Top of the y axis: a little headroom above the largest value.
pub fn y_upper_bound(series: &YearSeries) -> f64 {
    series
        .max_value()
        .map(|m| (m * 1.1).max(1.0))
        .unwrap_or(10.0)
}

/// Draws rate charts and tables.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the line chart. Y starts at zero, x ticks are the school years.
    pub fn draw_rate_chart(ui: &mut egui::Ui, chart: &RateChart, height: f32) {
        let labels = chart.series().labels();
        let year_count = labels.len();

        Plot::new(("rate_chart", chart.id()))
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_y(0.0)
            .include_y(y_upper_bound(chart.series()))
            .include_x(-0.3)
            .include_x(year_count as f64 - 0.7)
            .y_axis_label(Y_AXIS_TITLE)
            .x_grid_spacer(move |_input| {
                (0..year_count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    labels.get(idx as usize).map(|l| l.to_string()).unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .label_formatter(|name, value| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!("Rate: {}%", (value.y * 100.0).round() / 100.0)
                }
            })
            .show(ui, |plot_ui| {
                for segment in chart.segments() {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(segment.iter().copied()))
                            .color(PRIMARY_COLOR)
                            .width(3.0)
                            .name(SERIES_NAME),
                    );
                }

                plot_ui.points(
                    Points::new(PlotPoints::from_iter(chart.markers()))
                        .radius(5.0)
                        .color(PRIMARY_COLOR)
                        .name(SERIES_NAME),
                );
            });
    }

    /// Draw the detail table: present years only, newest first.
    pub fn draw_rate_table(ui: &mut egui::Ui, series: &YearSeries) {
        let rows = series.table_rows();
        if rows.is_empty() {
            ui.label(RichText::new("No reported rates").color(Color32::GRAY));
            return;
        }

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("rate_table")
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("School Year").strong());
                        ui.label(RichText::new("Rate").strong());
                        ui.end_row();

                        for (label, value) in rows {
                            ui.label(label);
                            ui.label(format_rate(value));
                            ui.end_row();
                        }
                    });
            });
    }
}
