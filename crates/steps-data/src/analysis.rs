//! Aggregation stage of the step pipeline.
//!
//! Turns a normalized step table into the daily and monthly tables the charts
//! are drawn from, plus a little metadata about the run.

use chrono::NaiveDate;
use serde::Serialize;
use steps_core::error::{Result, StepsError};
use steps_core::models::{DailyTotal, MonthlyTotal, NormalizedStep};
use tracing::debug;

use crate::aggregator::StepAggregator;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the aggregated tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisMetadata {
    /// Step rows fed into the aggregation.
    pub steps_processed: usize,
    /// Sum of every step row.
    pub total_steps: u64,
    /// Distinct days with at least one step row.
    pub days_covered: usize,
    /// Distinct months with at least one step row.
    pub months_covered: usize,
    /// Earliest `step_date`, `None` for an empty table.
    pub first_day: Option<NaiveDate>,
    /// Latest `step_date`, `None` for an empty table.
    pub last_day: Option<NaiveDate>,
}

/// The complete output of [`analyze_steps`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepAnalysis {
    /// One row per day, ascending.
    pub daily: Vec<DailyTotal>,
    /// One row per month, ascending.
    pub monthly: Vec<MonthlyTotal>,
    pub metadata: AnalysisMetadata,
}

impl StepAnalysis {
    /// Daily totals as floats, in date order.
    pub fn daily_values(&self) -> Vec<f64> {
        self.daily
            .iter()
            .map(|d| d.step_count_value as f64)
            .collect()
    }

    /// Monthly totals as floats, in month order.
    pub fn monthly_values(&self) -> Vec<f64> {
        self.monthly
            .iter()
            .map(|m| m.step_count_value as f64)
            .collect()
    }

    /// `true` when there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Aggregate a normalized step table into daily and monthly totals.
///
/// Pure: the same input always yields the same tables. Fails with
/// [`StepsError::InvalidValue`] when a total overflows `u64`.
pub fn analyze_steps(steps: &[NormalizedStep]) -> Result<StepAnalysis> {
    let daily = StepAggregator::aggregate_daily(steps)?;
    let monthly = StepAggregator::aggregate_monthly(steps)?;
    let total_steps = monthly
        .iter()
        .try_fold(0u64, |acc, m| acc.checked_add(m.step_count_value))
        .ok_or_else(|| StepsError::InvalidValue {
            field: "total step count".to_string(),
            value: format!("sum of {} monthly totals", monthly.len()),
        })?;

    let metadata = AnalysisMetadata {
        steps_processed: steps.len(),
        total_steps,
        days_covered: daily.len(),
        months_covered: monthly.len(),
        first_day: daily.first().map(|d| d.step_date),
        last_day: daily.last().map(|d| d.step_date),
    };

    debug!(
        "Aggregated {} step rows into {} days and {} months",
        metadata.steps_processed, metadata.days_covered, metadata.months_covered
    );

    Ok(StepAnalysis {
        daily,
        monthly,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
