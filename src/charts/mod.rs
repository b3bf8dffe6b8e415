//! Charts module - Chart rendering and the live chart slot

mod plotter;
mod renderer;
mod slot;

pub use plotter::{line_segments, y_upper_bound, ChartPlotter, RateChart};
pub use renderer::{ExportError, StaticChartRenderer};
pub use slot::ChartSlot;
