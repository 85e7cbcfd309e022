use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::time_utils::month_start;

/// Category tag that marks a record as a step count.
pub const STEP_COUNT_TYPE: &str = "HKQuantityTypeIdentifierStepCount";

/// Number of daily totals in the trailing rolling average.
pub const ROLLING_WINDOW: usize = 7;

/// One `Record` element of a health export, attributes kept as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Category identifier, e.g. `HKQuantityTypeIdentifierStepCount`.
    pub record_type: String,
    pub creation_date: String,
    pub start_date: String,
    pub end_date: String,
    /// Numeric payload as written in the export.
    pub value: String,
}

/// A step-count record with its value parsed but timestamps still raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRow {
    pub record_created: String,
    pub step_start_time: String,
    pub step_end_time: String,
    pub step_count_value: u64,
}

/// A step row after timestamp parsing, with its derived calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedStep {
    pub record_created: DateTime<FixedOffset>,
    pub step_start_time: DateTime<FixedOffset>,
    pub step_end_time: DateTime<FixedOffset>,
    pub step_count_value: u64,
    /// Calendar day of `step_start_time`, in the offset it was recorded with.
    pub step_date: NaiveDate,
}

impl NormalizedStep {
    /// First day of the month containing `step_date`.
    pub fn analysis_month(&self) -> NaiveDate {
        month_start(self.step_date)
    }
}

/// Steps summed over one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub step_date: NaiveDate,
    pub step_count_value: u64,
    /// Trailing mean over the last [`ROLLING_WINDOW`] rows; `None` until the
    /// window is full.
    pub seven_day_avg: Option<f64>,
}

/// Steps summed over one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    /// First day of the month.
    pub analysis_month: NaiveDate,
    pub step_count_value: u64,
    /// Change versus the previous month; `None` for the first month.
    pub step_difference: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_utils::parse_timestamp;

    #[test]
    fn test_analysis_month_truncates_to_first_day() {
        let start = parse_timestamp("2024-03-17 09:15:00 +0100").unwrap();
        let step = NormalizedStep {
            record_created: start,
            step_start_time: start,
            step_end_time: start,
            step_count_value: 12,
            step_date: start.date_naive(),
        };
        assert_eq!(
            step.analysis_month(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_totals_serialize_column_names() {
        let daily = DailyTotal {
            step_date: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
            step_count_value: 4_200,
            seven_day_avg: None,
        };
        let json = serde_json::to_value(&daily).unwrap();
        assert_eq!(json["step_date"], "2024-01-07");
        assert_eq!(json["step_count_value"], 4_200);
        assert!(json["seven_day_avg"].is_null());

        let monthly = MonthlyTotal {
            analysis_month: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            step_count_value: 90_000,
            step_difference: Some(-1_500),
        };
        let json = serde_json::to_value(&monthly).unwrap();
        assert_eq!(json["analysis_month"], "2024-02-01");
        assert_eq!(json["step_difference"], -1_500);
    }
}
