//! Step-count extraction from a parsed health export.

use steps_core::error::{Result, StepsError};
use steps_core::models::{RawRecord, StepRow, STEP_COUNT_TYPE};
use tracing::debug;

use crate::loader::XmlNode;

/// Dotted path of the record list inside an export.
pub const RECORD_PATH: &str = "HealthData.Record";

/// Pull every step-count record out of `document`, in document order.
///
/// Records of any other type are skipped. Fails with
/// [`StepsError::Schema`] when the document has no `HealthData.Record`
/// entries or a record lacks a required attribute, and with
/// [`StepsError::InvalidValue`] when a step record's `value` is not a
/// non-negative integer.
pub fn extract_step_rows(document: &XmlNode) -> Result<Vec<StepRow>> {
    let records = document.select(RECORD_PATH);
    if records.is_empty() {
        return Err(StepsError::Schema(format!(
            "no {} entries found (document root is <{}>)",
            RECORD_PATH, document.name
        )));
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for node in &records {
        let record_type = require_attr(node, "type")?;
        if record_type != STEP_COUNT_TYPE {
            skipped += 1;
            continue;
        }
        let raw = raw_record(node, record_type)?;
        rows.push(to_step_row(raw)?);
    }

    debug!(
        "Extracted {} step rows, skipped {} other records",
        rows.len(),
        skipped
    );

    Ok(rows)
}

/// Parse a record's `value` attribute into a step count.
///
/// Surrounding whitespace is ignored; signs, decimals and anything else are
/// rejected.
pub fn parse_step_value(value: &str) -> Result<u64> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_value(value));
    }
    digits.parse::<u64>().map_err(|_| invalid_value(value))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn raw_record(node: &XmlNode, record_type: &str) -> Result<RawRecord> {
    Ok(RawRecord {
        record_type: record_type.to_string(),
        creation_date: require_attr(node, "creationDate")?.to_string(),
        start_date: require_attr(node, "startDate")?.to_string(),
        end_date: require_attr(node, "endDate")?.to_string(),
        value: require_attr(node, "value")?.to_string(),
    })
}

fn to_step_row(raw: RawRecord) -> Result<StepRow> {
    let step_count_value = parse_step_value(&raw.value)?;
    Ok(StepRow {
        record_created: raw.creation_date,
        step_start_time: raw.start_date,
        step_end_time: raw.end_date,
        step_count_value,
    })
}

fn require_attr<'a>(node: &'a XmlNode, name: &str) -> Result<&'a str> {
    node.attr(name).ok_or_else(|| {
        StepsError::Schema(format!("<{}> is missing the '{}' attribute", node.name, name))
    })
}

fn invalid_value(value: &str) -> StepsError {
    StepsError::InvalidValue {
        field: "value".to_string(),
        value: value.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
