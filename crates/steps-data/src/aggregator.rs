//! Step aggregation over daily and monthly time windows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use steps_core::error::{Result, StepsError};
use steps_core::models::{DailyTotal, MonthlyTotal, NormalizedStep, ROLLING_WINDOW};

// ── StepAggregator ────────────────────────────────────────────────────────────

/// Stateless helper that groups normalized steps by calendar period.
pub struct StepAggregator;

impl StepAggregator {
    /// Sum steps per `step_date` and attach the trailing 7-row average.
    ///
    /// Returns one row per distinct date, sorted ascending. A day whose total
    /// does not fit in `u64` is an [`StepsError::InvalidValue`].
    pub fn aggregate_daily(steps: &[NormalizedStep]) -> Result<Vec<DailyTotal>> {
        let sums = Self::sum_by_key(steps, "daily", |s| s.step_date)?;
        let totals: Vec<u64> = sums.values().copied().collect();
        let averages = rolling_mean(&totals, ROLLING_WINDOW);

        Ok(sums
            .into_iter()
            .zip(averages)
            .map(|((step_date, step_count_value), seven_day_avg)| DailyTotal {
                step_date,
                step_count_value,
                seven_day_avg,
            })
            .collect())
    }

    /// Sum steps per `analysis_month` and attach the change versus the
    /// previous month.
    ///
    /// Returns one row per distinct month, sorted ascending. Overflowing
    /// totals fail as in [`StepAggregator::aggregate_daily`].
    pub fn aggregate_monthly(steps: &[NormalizedStep]) -> Result<Vec<MonthlyTotal>> {
        let sums = Self::sum_by_key(steps, "monthly", NormalizedStep::analysis_month)?;
        let totals: Vec<u64> = sums.values().copied().collect();
        let differences = first_difference(&totals);

        Ok(sums
            .into_iter()
            .zip(differences)
            .map(
                |((analysis_month, step_count_value), step_difference)| MonthlyTotal {
                    analysis_month,
                    step_count_value,
                    step_difference,
                },
            )
            .collect())
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// `key_fn` maps a step to the date that identifies its bucket; `period`
    /// names the bucket kind in overflow errors.
    fn sum_by_key(
        steps: &[NormalizedStep],
        period: &str,
        key_fn: impl Fn(&NormalizedStep) -> NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, u64>> {
        // BTreeMap keeps the buckets in chronological order.
        let mut map: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for step in steps {
            let key = key_fn(step);
            let total = map.entry(key).or_insert(0);
            let current = *total;
            *total = current
                .checked_add(step.step_count_value)
                .ok_or_else(|| StepsError::InvalidValue {
                    field: format!("{period} step total"),
                    value: format!("{key}: {current} + {}", step.step_count_value),
                })?;
        }
        Ok(map)
    }
}

// ── Series helpers ────────────────────────────────────────────────────────────

/// Trailing mean over `window` consecutive values.
///
/// Element `i` is `Some` iff `i + 1 >= window`, and then equals the mean of
/// `values[i + 1 - window..=i]`. A `window` of zero yields all `None`.
pub fn rolling_mean(values: &[u64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut running: u128 = 0;
    for (i, &value) in values.iter().enumerate() {
        running += u128::from(value);
        if i >= window {
            running -= u128::from(values[i - window]);
        }
        if i + 1 >= window {
            out.push(Some(running as f64 / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// First-order difference: element `i` is `values[i] - values[i - 1]`, and
/// the first element is `None`.
pub fn first_difference(values: &[u64]) -> Vec<Option<i64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut previous: Option<u64> = None;
    for &value in values {
        out.push(previous.map(|p| signed_delta(value, p)));
        previous = Some(value);
    }
    out
}

/// `current - previous`, saturating at the `i64` range.
fn signed_delta(current: u64, previous: u64) -> i64 {
    if current >= previous {
        i64::try_from(current - previous).unwrap_or(i64::MAX)
    } else {
        i64::try_from(previous - current).map_or(i64::MIN, |d| -d)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
