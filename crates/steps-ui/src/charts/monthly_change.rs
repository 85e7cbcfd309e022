//! Month-over-month change in total steps.
//!
//! Each month after the first gets a bar from zero to its change versus the
//! previous month. The first month has no previous month, so it keeps its
//! slot on the x axis but carries no bar.

use ratatui::{
    layout::Rect,
    symbols::Marker,
    widgets::{Chart, Dataset, GraphType},
    Frame,
};

use steps_core::formatting::{format_delta, format_month};
use steps_core::models::MonthlyTotal;

use super::{axis, chart_block, extent, padded_bounds, spread_labels};
use crate::themes::Theme;

pub const TITLE: &str = "Monthly Step Change";
const X_TITLE: &str = "Month";
const Y_TITLE: &str = "Step Count Change";

/// Most month labels drawn under the x axis.
const MAX_MONTH_LABELS: usize = 7;

/// Plot coordinates for the monthly change chart. `x` is the month's index.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyChangeSeries {
    /// Months whose total rose.
    pub increases: Vec<(f64, f64)>,
    /// Months whose total stayed the same or fell.
    pub decreases: Vec<(f64, f64)>,
    pub x_labels: Vec<String>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl MonthlyChangeSeries {
    /// Signed step counts for the low end, middle and high end of the y axis.
    pub fn y_labels(&self) -> Vec<String> {
        let [lo, hi] = self.y_bounds;
        [lo, (lo + hi) / 2.0, hi]
            .iter()
            .map(|v| format_delta(v.round() as i64))
            .collect()
    }
}

pub fn monthly_change_series(monthly: &[MonthlyTotal]) -> MonthlyChangeSeries {
    let mut increases = Vec::new();
    let mut decreases = Vec::new();
    for (idx, month) in monthly.iter().enumerate() {
        let Some(delta) = month.step_difference else {
            continue;
        };
        let point = (idx as f64, delta as f64);
        if delta > 0 {
            increases.push(point);
        } else {
            decreases.push(point);
        }
    }

    let labels: Vec<String> = monthly
        .iter()
        .map(|m| format_month(m.analysis_month))
        .collect();

    // A lone month is centred with blank labels either side.
    let (x_bounds, x_labels) = if monthly.len() > 1 {
        (
            [0.0, (monthly.len() - 1) as f64],
            spread_labels(&labels, MAX_MONTH_LABELS),
        )
    } else {
        let mut padded = vec![String::new()];
        padded.extend(labels);
        padded.push(String::new());
        ([-1.0, 1.0], padded)
    };

    // Bars grow from zero, so zero is always inside the y range.
    let (lo, hi) = extent(increases.iter().chain(&decreases).map(|p| p.1)).unwrap_or((0.0, 0.0));
    let y_bounds = padded_bounds(lo.min(0.0), hi.max(0.0));

    MonthlyChangeSeries {
        increases,
        decreases,
        x_labels,
        x_bounds,
        y_bounds,
    }
}

/// Render the monthly change chart into `area`.
pub fn render_monthly_change(
    frame: &mut Frame,
    area: Rect,
    monthly: &[MonthlyTotal],
    theme: &Theme,
) {
    let series = monthly_change_series(monthly);

    let chart = Chart::new(vec![
        Dataset::default()
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(theme.increase)
            .data(&series.increases),
        Dataset::default()
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(theme.decrease)
            .data(&series.decreases),
    ])
    .block(chart_block(TITLE, theme))
    .x_axis(axis(
        X_TITLE,
        theme.axis,
        series.x_bounds,
        series.x_labels.clone(),
    ))
    .y_axis(axis(
        Y_TITLE,
        theme.axis,
        series.y_bounds,
        series.y_labels(),
    ));

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
