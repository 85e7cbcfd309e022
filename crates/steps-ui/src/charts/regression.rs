//! Monthly totals against month index with a least-squares trend line.

use ratatui::{
    layout::Rect,
    symbols::Marker,
    widgets::{Chart, Dataset, GraphType, LegendPosition},
    Frame,
};
use tracing::{debug, warn};

use steps_core::models::MonthlyTotal;
use steps_data::stats::{linear_fit, LinearFit};

use super::{axis, chart_block, extent, padded_bounds, value_labels};
use crate::themes::Theme;

pub const TITLE: &str = "Step Trend with Regression Line";
const X_TITLE: &str = "Month Index";
const Y_TITLE: &str = "Total Step Count";

/// Plot coordinates for the regression chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionSeries {
    /// `(month index, total)` per month, index counted from zero.
    pub points: Vec<(f64, f64)>,
    pub fit: Option<LinearFit>,
    /// Fitted line across the observed index range, empty without a fit.
    pub fit_line: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

pub fn regression_series(monthly: &[MonthlyTotal]) -> RegressionSeries {
    let points: Vec<(f64, f64)> = monthly
        .iter()
        .enumerate()
        .map(|(idx, m)| (idx as f64, m.step_count_value as f64))
        .collect();

    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let fit = linear_fit(&xs, &ys);

    let x_range = extent(xs.iter().copied());
    let fit_line = match (fit, x_range) {
        (Some(fit), Some((lo, hi))) => {
            debug!(
                "Monthly trend: slope {:.1} steps/month, intercept {:.1}",
                fit.slope, fit.intercept
            );
            vec![(lo, fit.predict(lo)), (hi, fit.predict(hi))]
        }
        _ => {
            warn!(
                "Regression line undefined for {} month(s); plotting totals only",
                points.len()
            );
            Vec::new()
        }
    };

    let (x_lo, x_hi) = x_range.unwrap_or((0.0, 0.0));
    let (y_lo, y_hi) = extent(ys.iter().chain(fit_line.iter().map(|p| &p.1)).copied())
        .unwrap_or((0.0, 0.0));

    RegressionSeries {
        points,
        fit,
        fit_line,
        x_bounds: padded_bounds(x_lo, x_hi),
        y_bounds: padded_bounds(y_lo.min(0.0), y_hi),
    }
}

/// Render the regression chart into `area`.
pub fn render_regression(frame: &mut Frame, area: Rect, monthly: &[MonthlyTotal], theme: &Theme) {
    let series = regression_series(monthly);

    let mut datasets = vec![Dataset::default()
        .name("Monthly total")
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(theme.scatter_point)
        .data(&series.points)];
    if !series.fit_line.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Linear fit")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.fit_line)
                .data(&series.fit_line),
        );
    }

    let chart = Chart::new(datasets)
        .block(chart_block(TITLE, theme))
        .legend_position(Some(LegendPosition::TopLeft))
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
