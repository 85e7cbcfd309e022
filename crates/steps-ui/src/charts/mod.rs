//! The four step charts.
//!
//! Every chart is split into a pure series builder, which turns the
//! aggregated tables into plot coordinates, and a `render_*` function that
//! draws those coordinates with ratatui's [`Chart`](ratatui::widgets::Chart)
//! widget.

pub mod distribution;
pub mod monthly_change;
pub mod regression;
pub mod trend;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Paragraph},
    Frame,
};

use steps_core::formatting::format_axis_value;
use steps_data::analysis::StepAnalysis;

use crate::themes::Theme;

/// One of the charts produced from a [`StepAnalysis`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChart {
    Trend,
    Distribution,
    MonthlyChange,
    Regression,
}

impl StepChart {
    /// Every chart in the order it is shown.
    pub const ALL: [StepChart; 4] = [
        StepChart::Trend,
        StepChart::Distribution,
        StepChart::MonthlyChange,
        StepChart::Regression,
    ];

    pub fn title(self) -> &'static str {
        match self {
            StepChart::Trend => trend::TITLE,
            StepChart::Distribution => distribution::TITLE,
            StepChart::MonthlyChange => monthly_change::TITLE,
            StepChart::Regression => regression::TITLE,
        }
    }
}

/// Draw `chart` for `analysis` into `area`.
///
/// Falls back to [`render_no_data`] when the analysis has no rows.
pub fn render_chart(
    frame: &mut Frame,
    area: Rect,
    chart: StepChart,
    analysis: &StepAnalysis,
    theme: &Theme,
) {
    if analysis.is_empty() {
        render_no_data(frame, area, chart.title(), theme);
        return;
    }

    match chart {
        StepChart::Trend => trend::render_trend(frame, area, &analysis.daily, theme),
        StepChart::Distribution => {
            distribution::render_distribution(frame, area, &analysis.daily_values(), theme)
        }
        StepChart::MonthlyChange => {
            monthly_change::render_monthly_change(frame, area, &analysis.monthly, theme)
        }
        StepChart::Regression => {
            regression::render_regression(frame, area, &analysis.monthly, theme)
        }
    }
}

/// Render a "no data" placeholder under `title`.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No step data to plot", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "The export holds no step-count records.",
            theme.text,
        )),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(chart_block(title, theme)),
        area,
    );
}

/// Footer shown under every chart.
pub const DISMISS_HINT: &str = "Press q, Esc, Enter or Space to continue, Ctrl+C to skip the rest";

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Bordered block carrying a chart title and the dismiss hint.
pub(crate) fn chart_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {title} "), theme.title))
        .title_bottom(Span::styled(format!(" {DISMISS_HINT} "), theme.dim))
}

/// Titled axis with fixed bounds and evenly spaced labels.
pub(crate) fn axis(
    title: &'static str,
    style: Style,
    bounds: [f64; 2],
    labels: Vec<String>,
) -> Axis<'static> {
    Axis::default()
        .title(title)
        .style(style)
        .bounds(bounds)
        .labels(labels)
}

/// Axis bounds covering `[lo, hi]` with a 5% margin on each side.
///
/// An empty or zero-width range is widened to one unit either way.
pub(crate) fn padded_bounds(lo: f64, hi: f64) -> [f64; 2] {
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        let centre = if lo.is_finite() { lo } else { 0.0 };
        return [centre - 1.0, centre + 1.0];
    }
    let pad = (hi - lo) * 0.05;
    [lo - pad, hi + pad]
}

/// Three labels for a numeric axis: low end, midpoint and high end.
pub(crate) fn value_labels(bounds: [f64; 2]) -> Vec<String> {
    let [lo, hi] = bounds;
    vec![
        format_axis_value(lo),
        format_axis_value((lo + hi) / 2.0),
        format_axis_value(hi),
    ]
}

/// Smallest and largest of `values`, `None` when empty.
pub(crate) fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Pick at most `max` labels spread evenly over `labels`, keeping both ends.
///
/// ratatui spaces axis labels evenly, so an evenly spaced subset still lines
/// up with the indices it names.
pub(crate) fn spread_labels(labels: &[String], max: usize) -> Vec<String> {
    if labels.len() <= max || max < 2 {
        return labels.to_vec();
    }
    let last = labels.len() - 1;
    (0..max)
        .map(|i| {
            let idx = (i * last + (max - 1) / 2) / (max - 1);
            labels[idx].clone()
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
