//! GUI module - User interface components

mod app;
mod results_view;
mod search_panel;

pub use app::{export_file_name, AbsenteeApp};
pub use results_view::{ResultsAction, ResultsView};
pub use search_panel::{SearchPanel, SearchPanelAction};
