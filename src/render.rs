use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::data::model::AggregatedSeries;

// ---------------------------------------------------------------------------
// Chart rendering
// ---------------------------------------------------------------------------

/// 6x4 in at 160 dpi, the figure size of the plots this tool replaces.
const FIGURE_SIZE: (u32, u32) = (960, 640);

const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const MARKER_RADIUS: i32 = 4;

/// Draw the aggregated series as a single line with circular markers and save
/// it as a PNG at `output`. The caller is responsible for the "no data" case
/// and for creating the parent directory.
pub fn render_series(
    series: &AggregatedSeries,
    xlabel: &str,
    ylabel: &str,
    title: &str,
    output: &Path,
) -> Result<()> {
    let x_range = padded_range(series.points.iter().map(|&(x, _)| x));
    let y_range = padded_range(series.points.iter().map(|&(_, y)| y));

    let root = BitMapBackend::new(output, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(xlabel)
        .y_desc(ylabel)
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(LineSeries::new(
        series.points.iter().copied(),
        SERIES_COLOR.stroke_width(2),
    ))?;
    chart.draw_series(
        series
            .points
            .iter()
            .map(|&point| Circle::new(point, MARKER_RADIUS, SERIES_COLOR.filled())),
    )?;

    root.present()
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

/// Axis range with a 5% margin; degenerate spans (a single distinct value)
/// get an artificial margin so the coordinate system stays non-empty.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        min.abs().max(1.0) * 0.1
    };
    (min - pad)..(max + pad)
}
