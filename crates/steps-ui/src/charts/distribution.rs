//! Histogram of daily totals with an overlaid density curve.

use ratatui::{
    layout::Rect,
    symbols::Marker,
    widgets::{Chart, Dataset, GraphType, LegendPosition},
    Frame,
};
use tracing::warn;

use steps_data::stats::{gaussian_kde, histogram, DENSITY_GRID_POINTS, HISTOGRAM_BINS};

use super::{axis, chart_block, padded_bounds, render_no_data, value_labels};
use crate::themes::Theme;

pub const TITLE: &str = "Distribution of Daily Steps";
const X_TITLE: &str = "Step Count";
const Y_TITLE: &str = "Frequency";

/// Vertical strokes drawn per bin so the bars read as filled columns.
const STROKES_PER_BIN: usize = 4;

/// Plot coordinates for the distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSeries {
    /// `(x, count)` strokes, `STROKES_PER_BIN` per histogram bin.
    pub bars: Vec<(f64, f64)>,
    /// Density curve on the count scale, absent when it is undefined.
    pub density: Option<Vec<(f64, f64)>>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

/// Build the histogram strokes and density overlay for `values`.
///
/// Returns `None` for an empty input.
pub fn distribution_series(values: &[f64]) -> Option<DistributionSeries> {
    let hist = histogram(values, HISTOGRAM_BINS)?;
    let width = hist.bin_width();

    let mut bars = Vec::with_capacity(hist.counts.len() * STROKES_PER_BIN);
    for (lo, &count) in hist.edges.iter().zip(&hist.counts) {
        if count == 0 {
            continue;
        }
        for k in 0..STROKES_PER_BIN {
            let x = lo + width * (k as f64 + 0.5) / STROKES_PER_BIN as f64;
            bars.push((x, count as f64));
        }
    }

    let density = match gaussian_kde(values, DENSITY_GRID_POINTS) {
        Some(curve) => Some(curve.scaled_to_counts(values.len(), width)),
        None => {
            warn!(
                "Density curve undefined for {} daily totals; drawing histogram only",
                values.len()
            );
            None
        }
    };

    let peak = density
        .iter()
        .flatten()
        .map(|p| p.1)
        .fold(hist.max_count() as f64, f64::max);

    let x_bounds = match (hist.edges.first(), hist.edges.last()) {
        (Some(&lo), Some(&hi)) => [lo, hi],
        _ => [0.0, 1.0],
    };

    Some(DistributionSeries {
        bars,
        density,
        x_bounds,
        y_bounds: [0.0, padded_bounds(0.0, peak)[1]],
    })
}

/// Render the distribution chart into `area`.
pub fn render_distribution(frame: &mut Frame, area: Rect, values: &[f64], theme: &Theme) {
    let Some(series) = distribution_series(values) else {
        render_no_data(frame, area, TITLE, theme);
        return;
    };

    let mut datasets = vec![Dataset::default()
        .name("Daily totals")
        .marker(Marker::HalfBlock)
        .graph_type(GraphType::Bar)
        .style(theme.histogram_bar)
        .data(&series.bars)];
    if let Some(ref density) = series.density {
        datasets.push(
            Dataset::default()
                .name("Density")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.density_line)
                .data(density),
        );
    }

    let chart = Chart::new(datasets)
        .block(chart_block(TITLE, theme))
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(axis(
            X_TITLE,
            theme.axis,
            series.x_bounds,
            value_labels(series.x_bounds),
        ))
        .y_axis(axis(
            Y_TITLE,
            theme.axis,
            series.y_bounds,
            value_labels(series.y_bounds),
        ));

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
