//! Absentee Lookup Main Application
//! Main window with search panel and results view.

use crate::charts::StaticChartRenderer;
use crate::config::AppConfig;
use crate::data::{DataSource, Dataset, DistrictLoader, LoadError};
use crate::gui::{ResultsAction, ResultsView, SearchPanel, SearchPanelAction};
use crate::session::Session;
use egui::{Pos2, Rect};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{debug, error, warn};

/// CSV loading result from background thread
enum LoadMessage {
    Progress(String),
    Complete(Dataset),
    Error(LoadError),
}

/// Main application window.
pub struct AbsenteeApp {
    config: AppConfig,
    session: Session,
    search_panel: SearchPanel,
    results_view: ResultsView,

    // Async CSV loading
    load_rx: Option<Receiver<LoadMessage>>,
    is_loading: bool,

    search_area: Option<Rect>,
}

impl AbsenteeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            session: Session::new(config.min_query_chars),
            config,
            search_panel: SearchPanel::new(),
            results_view: ResultsView::new(),
            load_rx: None,
            is_loading: false,
            search_area: None,
        };
        app.start_load();
        app
    }

    /// Load the dataset in a background thread
    fn start_load(&mut self) {
        if self.is_loading {
            return;
        }

        let source: DataSource = self.config.data_source();
        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;

        thread::spawn(move || {
            let _ = tx.send(LoadMessage::Progress(format!("Fetching {}", source)));

            match DistrictLoader::load(&source) {
                Ok(dataset) => {
                    let _ = tx.send(LoadMessage::Complete(dataset));
                }
                Err(e) => {
                    let _ = tx.send(LoadMessage::Error(e));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(message) = rx.try_recv() {
                match message {
                    LoadMessage::Progress(status) => {
                        debug!("{}", status);
                    }
                    LoadMessage::Complete(dataset) => {
                        self.session.on_load_complete(dataset);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadMessage::Error(err) => {
                        self.session.on_load_failed(&err);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Route a primary click outside the search area to the session
    fn check_outside_click(&mut self, ctx: &egui::Context) {
        let clicked_at: Option<Pos2> = ctx.input(|i| {
            if i.pointer.primary_clicked() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });

        if let (Some(pos), Some(area)) = (clicked_at, self.search_area) {
            if !area.contains(pos) {
                self.session.on_click_outside();
            }
        }
    }

    /// Render the current chart to a PNG chosen by the user
    fn handle_export_png(&mut self) {
        let Some(chart) = self.session.chart() else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(export_file_name(chart.title()))
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::export_png(
            chart,
            &path,
            self.config.export_width,
            self.config.export_height,
        ) {
            Ok(()) => {
                self.results_view
                    .set_notice(format!("Saved chart to {}", path.display()));
                if self.config.open_after_export {
                    if let Err(e) = open::that(&path) {
                        warn!("Could not open {}: {}", path.display(), e);
                    }
                }
            }
            Err(e) => {
                error!("PNG export failed: {}", e);
                self.results_view.set_notice(format!("Export error: {}", e));
            }
        }
    }
}

/// Default export file name: district name with anything unusual replaced.
pub fn export_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "district".to_string() } else { stem };
    format!("{}_absenteeism.png", stem)
}

impl eframe::App for AbsenteeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Top panel - search box and results
        egui::TopBottomPanel::top("search_panel").show(ctx, |ui| {
            ui.add_space(5.0);
            let (action, area) = self.search_panel.show(ui, &self.session);
            self.search_area = Some(area);
            ui.add_space(8.0);

            match action {
                SearchPanelAction::QueryChanged(query) => self.session.on_query_changed(&query),
                SearchPanelAction::ResultChosen(index) => {
                    self.session.on_result_chosen(index);
                    self.results_view.clear_notice();
                }
                SearchPanelAction::None => {}
            }
        });

        self.check_outside_click(ctx);

        // Central panel - chart and table
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.results_view.show(ui, &self.session) == ResultsAction::ExportPng {
                self.handle_export_png();
            }
        });
    }
}
