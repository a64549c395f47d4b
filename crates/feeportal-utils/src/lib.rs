//! Utility functions and helpers

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder shown for missing values
pub const MISSING: &str = "-";

/// Group the integer digits the Indian way: `1234567` -> `12,34,567`
pub fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Format a number with Indian digit grouping and at most three fraction digits
pub fn format_number(n: Decimal) -> String {
    let rounded = n
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.to_string();

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, group_indian(int_part), frac),
        None => format!("{}{}", sign, group_indian(int_part)),
    }
}

/// Currency display, e.g. `₹1,23,456.5`; missing amounts render as `-`
pub fn format_amount(amount: Option<Decimal>, symbol: &str) -> String {
    match amount {
        Some(n) => format!("{}{}", symbol, format_number(n)),
        None => MISSING.to_string(),
    }
}

/// Build a fixed offset from minutes east of UTC, falling back to UTC
pub fn display_offset(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
}

/// Parse the timestamp shapes the payments backend emits
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Naive datetimes and bare dates are taken as UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render a payment time as `d/m/yyyy, h:mm:ss am` in the given offset.
///
/// Missing or empty values render as `-`; values that cannot be parsed are
/// shown as received.
pub fn format_datetime(raw: Option<&str>, offset: FixedOffset) -> String {
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r,
        _ => return MISSING.to_string(),
    };
    match parse_timestamp(raw) {
        Some(dt) => dt
            .with_timezone(&offset)
            .format("%-d/%-m/%Y, %-I:%M:%S %P")
            .to_string(),
        None => raw.to_string(),
    }
}

/// Escape text for HTML element and attribute context
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generate a student identifier from the current time
pub fn generate_student_id() -> String {
    format!("student_{}", Utc::now().timestamp_millis())
}
