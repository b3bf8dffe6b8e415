//! Search Panel Widget
//! Top panel with the search box, the results list and the load status line.

use crate::data::SearchOutcome;
use crate::session::Session;
use egui::{Color32, Rect, RichText, ScrollArea};

const RESULTS_MAX_HEIGHT: f32 = 240.0;
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Actions triggered by the search panel
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPanelAction {
    None,
    QueryChanged(String),
    ResultChosen(usize),
}

/// Search box plus the dropdown-style results list.
#[derive(Default)]
pub struct SearchPanel {
    focused_once: bool,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the panel. Returns the action and the area covered by the search
    /// box and results list, for outside-click detection.
    pub fn show(&mut self, ui: &mut egui::Ui, session: &Session) -> (SearchPanelAction, Rect) {
        let mut action = SearchPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("District Absenteeism Lookup")
                    .size(22.0)
                    .color(Color32::from_rgb(37, 99, 235)),
            );
            ui.label(
                RichText::new("Chronic absenteeism rates by school year")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);

        let area = ui.vertical(|ui| {
            let mut query = session.query().to_string();
            let edit = ui.add(
                egui::TextEdit::singleline(&mut query)
                    .hint_text("Search for a school district...")
                    .desired_width(f32::INFINITY),
            );
            if !self.focused_once {
                edit.request_focus();
                self.focused_once = true;
            }
            if edit.changed() {
                action = SearchPanelAction::QueryChanged(query);
            }

            if session.results_visible() {
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(5.0)
                    .inner_margin(5.0)
                    .show(ui, |ui| {
                        ScrollArea::vertical()
                            .max_height(RESULTS_MAX_HEIGHT)
                            .auto_shrink([false, true])
                            .show(ui, |ui| match session.outcome() {
                                SearchOutcome::Matches(_) => {
                                    for (index, name) in session.result_names() {
                                        if ui.selectable_label(false, name).clicked() {
                                            action = SearchPanelAction::ResultChosen(index);
                                        }
                                    }
                                }
                                SearchOutcome::NoMatches => {
                                    ui.label(
                                        RichText::new("No matching districts found")
                                            .color(Color32::GRAY),
                                    );
                                }
                                SearchOutcome::Hidden => {}
                            });
                    });
            }
        });

        let status = session.status();
        if !status.message().is_empty() {
            ui.add_space(5.0);
            let color = if status.is_error() {
                ERROR_COLOR
            } else {
                Color32::GRAY
            };
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(status.message()).color(color));
            });
        }

        (action, area.response.rect)
    }
}
