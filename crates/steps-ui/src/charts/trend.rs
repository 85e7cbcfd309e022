//! Daily totals with their 7-day rolling average.

use chrono::{Duration, NaiveDate};
use ratatui::{
    layout::Rect,
    symbols::Marker,
    widgets::{Chart, Dataset, GraphType, LegendPosition},
    Frame,
};

use steps_core::formatting::format_day;
use steps_core::models::DailyTotal;
use steps_core::time_utils::days_between;

use super::{axis, chart_block, extent, padded_bounds, value_labels};
use crate::themes::Theme;

pub const TITLE: &str = "Daily Steps with Moving Average";
const X_TITLE: &str = "Date";
const Y_TITLE: &str = "Step Count";
const DAILY_LEGEND: &str = "Daily Total";
const ROLLING_LEGEND: &str = "7-Day Average";

/// Plot coordinates for the trend chart. `x` is days since `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub origin: Option<NaiveDate>,
    pub daily: Vec<(f64, f64)>,
    /// Only the days where the rolling average is defined.
    pub rolling: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl TrendSeries {
    /// Date labels for the low end, middle and high end of the x axis.
    pub fn x_labels(&self) -> Vec<String> {
        let Some(origin) = self.origin else {
            return Vec::new();
        };
        let [lo, hi] = self.x_bounds;
        [lo, (lo + hi) / 2.0, hi]
            .iter()
            .map(|&x| {
                origin
                    .checked_add_signed(Duration::days(x.round() as i64))
                    .map(format_day)
                    .unwrap_or_default()
            })
            .collect()
    }
}

pub fn trend_series(daily: &[DailyTotal]) -> TrendSeries {
    let origin = daily.first().map(|d| d.step_date);
    let offset = |date: NaiveDate| origin.map_or(0.0, |o| days_between(o, date) as f64);

    let points: Vec<(f64, f64)> = daily
        .iter()
        .map(|d| (offset(d.step_date), d.step_count_value as f64))
        .collect();
    let rolling: Vec<(f64, f64)> = daily
        .iter()
        .filter_map(|d| d.seven_day_avg.map(|avg| (offset(d.step_date), avg)))
        .collect();

    let x_bounds = match extent(points.iter().map(|p| p.0)) {
        Some((lo, hi)) if lo < hi => [lo, hi],
        Some((lo, _)) => [lo - 1.0, lo + 1.0],
        None => [-1.0, 1.0],
    };
    let y_max = extent(points.iter().map(|p| p.1)).map_or(0.0, |(_, hi)| hi);

    TrendSeries {
        origin,
        daily: points,
        rolling,
        x_bounds,
        y_bounds: padded_bounds(0.0, y_max),
    }
}

/// Render the daily trend chart into `area`.
pub fn render_trend(frame: &mut Frame, area: Rect, daily: &[DailyTotal], theme: &Theme) {
    let series = trend_series(daily);

    let mut datasets = vec![Dataset::default()
        .name(DAILY_LEGEND)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.daily_line)
        .data(&series.daily)];
    if !series.rolling.is_empty() {
        datasets.push(
            Dataset::default()
                .name(ROLLING_LEGEND)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.rolling_line)
                .data(&series.rolling),
        );
    }

    let chart = Chart::new(datasets)
        .block(chart_block(TITLE, theme))
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(axis(X_TITLE, theme.axis, series.x_bounds, series.x_labels()))
        .y_axis(axis(
            Y_TITLE,
            theme.axis,
            series.y_bounds,
            value_labels(series.y_bounds),
        ));

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
