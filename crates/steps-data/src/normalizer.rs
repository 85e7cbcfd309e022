//! Timestamp normalization for extracted step rows.

use steps_core::error::Result;
use steps_core::models::{NormalizedStep, StepRow};
use steps_core::time_utils::parse_timestamp;

/// Parse the three timestamp columns of every row and derive `step_date`.
///
/// Timestamps keep the offset they were written with; `step_date` is the
/// calendar day of `step_start_time` in that offset. The first unparseable
/// timestamp aborts the whole transform.
pub fn normalize(rows: &[StepRow]) -> Result<Vec<NormalizedStep>> {
    rows.iter().map(normalize_row).collect()
}

fn normalize_row(row: &StepRow) -> Result<NormalizedStep> {
    let step_start_time = parse_timestamp(&row.step_start_time)?;
    let step_end_time = parse_timestamp(&row.step_end_time)?;
    let record_created = parse_timestamp(&row.record_created)?;

    Ok(NormalizedStep {
        record_created,
        step_start_time,
        step_end_time,
        step_count_value: row.step_count_value,
        step_date: step_start_time.date_naive(),
    })
}
