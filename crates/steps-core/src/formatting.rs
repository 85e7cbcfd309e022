use chrono::NaiveDate;

/// Format a step count with thousands separators.
///
/// # Examples
///
/// ```
/// use steps_core::formatting::format_steps;
///
/// assert_eq!(format_steps(0), "0");
/// assert_eq!(format_steps(950), "950");
/// assert_eq!(format_steps(1_234_567), "1,234,567");
/// ```
pub fn format_steps(steps: u64) -> String {
    group_thousands(&steps.to_string())
}

/// Format a month-over-month change with an explicit sign.
///
/// Zero carries no sign.
///
/// # Examples
///
/// ```
/// use steps_core::formatting::format_delta;
///
/// assert_eq!(format_delta(12_500), "+12,500");
/// assert_eq!(format_delta(-300), "-300");
/// assert_eq!(format_delta(0), "0");
/// ```
pub fn format_delta(delta: i64) -> String {
    let magnitude = group_thousands(&delta.unsigned_abs().to_string());
    match delta.signum() {
        1 => format!("+{}", magnitude),
        -1 => format!("-{}", magnitude),
        _ => magnitude,
    }
}

/// Short axis label for a value: `k` above a thousand, `M` above a million.
///
/// # Examples
///
/// ```
/// use steps_core::formatting::format_axis_value;
///
/// assert_eq!(format_axis_value(850.0), "850");
/// assert_eq!(format_axis_value(12_345.0), "12.3k");
/// assert_eq!(format_axis_value(-4_000.0), "-4.0k");
/// assert_eq!(format_axis_value(2_500_000.0), "2.5M");
/// ```
pub fn format_axis_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// Label for a monthly bucket, e.g. `"2024-01"`.
pub fn format_month(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

/// Label for a daily bucket, e.g. `"2024-01-15"`.
pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Insert `,` every three digits from the right of an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
