//! Results View Widget
//! Central panel showing the selected district's chart and rate table.

use crate::charts::ChartPlotter;
use crate::data::format_rate;
use crate::session::Session;
use egui::{Color32, RichText};

const CHART_HEIGHT: f32 = 360.0;

/// Actions triggered by the results view
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsAction {
    None,
    ExportPng,
}

#[derive(Default)]
pub struct ResultsView {
    notice: Option<String>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message shown under the export button (last export result).
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, session: &Session) -> ResultsAction {
        let mut action = ResultsAction::None;

        let Some(chart) = session.chart() else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("Search for a district to see its absenteeism history")
                        .size(16.0)
                        .color(Color32::GRAY),
                );
            });
            return action;
        };

        let series = chart.series();
        let district_name = session
            .selected()
            .map(|record| record.clean_name())
            .unwrap_or_else(|| chart.title());

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(district_name).size(20.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🖼 Export PNG").clicked() {
                            action = ResultsAction::ExportPng;
                        }
                    });
                });

                let summary = match series.latest() {
                    Some(point) => format!(
                        "Latest: {} ({}), {} of {} years reported",
                        point.value.map(format_rate).unwrap_or_default(),
                        point.label,
                        series.present_count(),
                        series.points().len()
                    ),
                    None => "No reported rates for this district".to_string(),
                };
                ui.label(RichText::new(summary).size(12.0).color(Color32::GRAY));

                if let Some(notice) = &self.notice {
                    ui.label(RichText::new(notice).size(11.0).color(Color32::GRAY));
                }

                ui.add_space(10.0);
                ChartPlotter::draw_rate_chart(ui, chart, CHART_HEIGHT);

                ui.add_space(15.0);
                ui.label(RichText::new("Rates by School Year").size(14.0).strong());
                ui.add_space(5.0);
                ChartPlotter::draw_rate_table(ui, series);
            });

        action
    }
}
