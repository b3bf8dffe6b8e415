//! Static Chart Renderer
//! Renders the current rate chart to a PNG with plotters.
//!
//! Layout matches the on-screen chart: district name as caption, school years
//! along x, percent on y starting at zero, gaps where a year has no value.

use crate::charts::plotter::{y_upper_bound, SERIES_NAME, Y_AXIS_TITLE};
use crate::charts::RateChart;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const PRIMARY: RGBColor = RGBColor(37, 99, 235);
const GRID: RGBColor = RGBColor(226, 232, 240);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Chart drawing failed: {0}")]
    Draw(String),
    #[error("Image buffer size mismatch")]
    Buffer,
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Draw(e.to_string())
}

/// Year label for an x position, blank between ticks.
fn year_label(labels: &[&str], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 1e-6 {
        return String::new();
    }
    labels
        .get(idx as usize)
        .map(|l| l.to_string())
        .unwrap_or_default()
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart into PNG bytes.
    pub fn render_png_bytes(
        chart: &RateChart,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ExportError> {
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let labels = chart.series().labels();
            let x_max = labels.len() as f64 - 0.5;

            let mut ctx = ChartBuilder::on(&root)
                .caption(chart.title(), ("sans-serif", 28))
                .margin(20)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(-0.5f64..x_max, 0f64..y_upper_bound(chart.series()))
                .map_err(draw_err)?;

            ctx.configure_mesh()
                .disable_x_mesh()
                .light_line_style(GRID)
                .x_labels(labels.len())
                .x_label_formatter(&|x| year_label(&labels, *x))
                .y_desc(Y_AXIS_TITLE)
                .draw()
                .map_err(draw_err)?;

            for (i, segment) in chart.segments().iter().enumerate() {
                let series = ctx
                    .draw_series(LineSeries::new(
                        segment.iter().map(|p| (p[0], p[1])),
                        PRIMARY.stroke_width(3),
                    ))
                    .map_err(draw_err)?;
                if i == 0 {
                    series
                        .label(SERIES_NAME)
                        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PRIMARY));
                }
            }

            ctx.draw_series(
                chart
                    .markers()
                    .into_iter()
                    .map(|p| Circle::new((p[0], p[1]), 5, PRIMARY.filled())),
            )
            .map_err(draw_err)?;

            if !chart.segments().is_empty() {
                ctx.configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()
                    .map_err(draw_err)?;
            }

            root.present().map_err(draw_err)?;
        }

        let image = RgbImage::from_raw(width, height, buffer).ok_or(ExportError::Buffer)?;
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageFormat::Png)?;
        Ok(png.into_inner())
    }

    /// Render the chart and write it to `path` as PNG.
    pub fn export_png(
        chart: &RateChart,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ExportError> {
        let bytes = Self::render_png_bytes(chart, width, height)?;
        std::fs::write(path, &bytes)?;
        info!(
            "Exported chart for {} to {} ({} bytes)",
            chart.title(),
            path.display(),
            bytes.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartSlot;
    use crate::data::{project, DistrictRecord};
    use image::GenericImageView;

    const PNG_SIGNATURE: [u8; 4] = [137, 80, 78, 71];

    fn gapped_chart(slot: &mut ChartSlot) -> &RateChart {
        let record = DistrictRecord::new(
            "Springfield Unified",
            [
                ("20192020", "10.5"),
                ("20202021", "NA"),
                ("20212022", ""),
                ("20222023", "8.25"),
                ("20232024", "NA"),
                ("20242025", "9.0"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        slot.replace(project(&record), "Springfield Unified")
    }

    #[test]
    fn renders_gapped_series_to_png() {
        let mut slot = ChartSlot::new();
        let chart = gapped_chart(&mut slot);
        assert_eq!(chart.segments().len(), 3);

        let bytes = StaticChartRenderer::render_png_bytes(chart, 400, 300).unwrap();
        assert_eq!(bytes[..4], PNG_SIGNATURE);

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.dimensions(), (400, 300));
    }

    #[test]
    fn export_writes_png_file() {
        let mut slot = ChartSlot::new();
        let chart = gapped_chart(&mut slot);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("springfield_absenteeism.png");

        StaticChartRenderer::export_png(chart, &path, 400, 300).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written[..4], PNG_SIGNATURE);
    }

    #[test]
    fn export_to_missing_directory_is_io_error() {
        let mut slot = ChartSlot::new();
        let chart = gapped_chart(&mut slot);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.png");

        let err = StaticChartRenderer::export_png(chart, &path, 200, 150).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn year_labels_only_on_integer_ticks() {
        let labels = ["2019-2020", "2020-2021"];
        assert_eq!(year_label(&labels, 0.0), "2019-2020");
        assert_eq!(year_label(&labels, 1.0), "2020-2021");
        assert_eq!(year_label(&labels, 0.5), "");
        assert_eq!(year_label(&labels, -0.5), "");
        assert_eq!(year_label(&labels, 2.0), "");
    }

    #[test]
    fn export_error_messages() {
        assert_eq!(
            ExportError::Draw("no font".into()).to_string(),
            "Chart drawing failed: no font"
        );
        assert_eq!(ExportError::Buffer.to_string(), "Image buffer size mismatch");
    }
}
