//! Scatter-and-line chart rendering for fiscal-year NDVI series.
//!
//! One chart shape: a scatter layer over the series points with a
//! semi-transparent line threaded through the same points, on a fixed
//! Apr-to-Mar month axis. Output goes through any plotters backend; the
//! file entry point picks SVG or PNG from the output extension.

use anyhow::Context;
use ndvi_core::fiscal;
use ndvi_core::series::FiscalSeries;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::path::Path;

/// Chart canvas size in pixels.
pub const CHART_SIZE: (u32, u32) = (1400, 500);

/// Horizontal axis span: rank 1 through rank 12 plus the day offset.
const X_RANGE: (f64, f64) = (0.5, 12.8);

/// Vertical axis span: the NDVI domain with a little headroom.
const Y_RANGE: (f64, f64) = (0.0, 1.05);

const POINT_SIZE: i32 = 5;
const LINE_ALPHA: f64 = 0.6;

/// Render a series to `path`, choosing the backend from the extension
/// (`.svg` or `.png`).
pub fn render_to_file(path: &Path, series: &FiscalSeries) -> anyhow::Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "svg" => {
            let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
            draw_fiscal_chart(root, series)
        }
        "png" => {
            let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
            draw_fiscal_chart(root, series)
        }
        other => anyhow::bail!("unsupported chart format: '{}' (use .svg or .png)", other),
    }
    .with_context(|| format!("rendering chart to {}", path.display()))?;

    log::info!(
        "chart: rendered {} points to {}",
        series.points.len(),
        path.display()
    );
    Ok(())
}

/// Draw the fiscal-year chart onto a drawing area.
///
/// Axis ticks sit at ranks 1 through 12 labeled with month abbreviations
/// in fiscal order; the title interpolates the two calendar years the
/// window spans.
pub fn draw_fiscal_chart<DB>(
    root: DrawingArea<DB, Shift>,
    series: &FiscalSeries,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let title = format!(
        "NDVI Time Series — Apr {} to Mar {}",
        series.start_year,
        series.start_year + 1
    );
    let title_font = FontDesc::new(FontFamily::SansSerif, 24.0, FontStyle::Normal);
    let axis_font = FontDesc::new(FontFamily::SansSerif, 16.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, title_font)
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(X_RANGE.0..X_RANGE.1, Y_RANGE.0..Y_RANGE.1)?;

    chart
        .configure_mesh()
        .x_labels(13)
        .x_label_formatter(&fiscal_tick_label)
        .y_label_formatter(&|v| format!("{:.1}", v))
        .x_desc("Month (Apr → Mar)")
        .y_desc("NDVI")
        .label_style(axis_font.color(&BLACK.mix(0.85)))
        .draw()?;

    let color = RGBColor(31, 119, 180);

    chart.draw_series(LineSeries::new(
        series.points.iter().map(|p| (p.x, p.ndvi)),
        &color.mix(LINE_ALPHA),
    ))?;
    chart.draw_series(
        series
            .points
            .iter()
            .map(|p| Circle::new((p.x, p.ndvi), POINT_SIZE, color.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Label integer ranks with their fiscal month abbreviation, everything
/// else with nothing.
fn fiscal_tick_label(x: &f64) -> String {
    let rank = x.round();
    if (x - rank).abs() < 1e-6 && (1.0..=12.0).contains(&rank) {
        fiscal::fiscal_label(rank as u32).unwrap_or("").to_string()
    } else {
        String::new()
    }
}
